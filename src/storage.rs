use crate::preferences;

mod page;
mod startup;

pub use page::{Cell, Page};
pub use startup::Startup;

/// Widest cell supported by any backing store.
pub const MAX_BITS: u32 = 32;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid cell width: {0} bits, expected 1 to 32")]
    InvalidWidth(u32),
}

/// Operations every backing store supports.
///
/// Addresses outside `0..len()` are tolerated: reads return zero and writes
/// are dropped.
pub trait StorageUnit: Clone {
    /// Number of cells, fixed at construction.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mask covering the configured cell width.
    fn mask(&self) -> u32;

    /// Reads a cell, sign-extended from its native container.
    ///
    /// A narrow unit holding `0x80..=0xff` returns a negative value; use
    /// [`StorageUnit::read_unsigned`] for the masked form.
    fn read(&self, address: usize) -> i32;

    /// Reads a cell normalized to the configured width.
    fn read_unsigned(&self, address: usize) -> u32 {
        self.read(address) as u32 & self.mask()
    }

    /// Writes a cell, truncated to the native container.
    ///
    /// The value is not masked again, callers pass values already masked to
    /// the configured width.
    fn write(&mut self, address: usize, value: i32);

    /// Bulk loads `values` into consecutive cells starting at `start`, each
    /// masked with `mask`. Values that do not fit are dropped.
    fn load(&mut self, start: usize, values: &[i32], mask: u32);

    /// An independent deep copy of this unit.
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// Size class of the native container picked for a cell width.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum WidthClass {
    /// Up to 8 bits, stored in bytes.
    Narrow,
    /// 9 to 16 bits, stored in 16-bit cells.
    Medium,
    /// 17 to 32 bits, stored in 32-bit cells.
    Wide,
}

impl WidthClass {
    pub fn for_bits(bits: u32) -> Self {
        match bits {
            0..=8 => WidthClass::Narrow,
            9..=16 => WidthClass::Medium,
            _ => WidthClass::Wide,
        }
    }

    /// Width of the native container in bits.
    pub fn container_bits(&self) -> u32 {
        match self {
            WidthClass::Narrow => i8::BITS,
            WidthClass::Medium => i16::BITS,
            WidthClass::Wide => i32::BITS,
        }
    }
}

/// Mask with the low `bits` bits set. `bits` must be at most [`MAX_BITS`].
pub fn mask_for_bits(bits: u32) -> u32 {
    debug_assert!(bits <= MAX_BITS);
    if bits == MAX_BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}

/// A block of memory cells backed by the smallest container that fits the
/// configured width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Narrow(Page<i8>),
    Medium(Page<i16>),
    Wide(Page<i32>),
}

macro_rules! dispatch {
    ($storage:expr, $page:ident => $body:expr) => {{
        match $storage {
            Storage::Narrow($page) => $body,
            Storage::Medium($page) => $body,
            Storage::Wide($page) => $body,
        }
    }};
}

impl Storage {
    /// Builds a unit of `size` cells, each `bits` wide, initialized according
    /// to `startup`.
    #[tracing::instrument]
    pub fn new(size: usize, bits: u32, startup: &Startup) -> Result<Self, StorageError> {
        if !(1..=MAX_BITS).contains(&bits) {
            return Err(StorageError::InvalidWidth(bits));
        }

        let mask = mask_for_bits(bits);
        let kind = WidthClass::for_bits(bits);
        tracing::debug!(%kind, mask, "selected backing store");

        Ok(match kind {
            WidthClass::Narrow => Storage::Narrow(Page::new(size, mask, startup)),
            WidthClass::Medium => Storage::Medium(Page::new(size, mask, startup)),
            WidthClass::Wide => Storage::Wide(Page::new(size, mask, startup)),
        })
    }

    pub fn kind(&self) -> WidthClass {
        match self {
            Storage::Narrow(_) => WidthClass::Narrow,
            Storage::Medium(_) => WidthClass::Medium,
            Storage::Wide(_) => WidthClass::Wide,
        }
    }

    /// All cell values in address order, as [`StorageUnit::read`] returns them.
    pub fn cells(&self) -> Box<dyn Iterator<Item = i32> + '_> {
        dispatch!(self, page => Box::new(page.cells()))
    }
}

impl StorageUnit for Storage {
    fn len(&self) -> usize {
        dispatch!(self, page => page.len())
    }

    fn mask(&self) -> u32 {
        dispatch!(self, page => page.mask())
    }

    fn read(&self, address: usize) -> i32 {
        dispatch!(self, page => page.read(address))
    }

    fn write(&mut self, address: usize, value: i32) {
        dispatch!(self, page => page.write(address, value))
    }

    fn load(&mut self, start: usize, values: &[i32], mask: u32) {
        dispatch!(self, page => page.load(start, values, mask))
    }

    #[tracing::instrument]
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

/// Creates a storage unit, initialized according to the process-wide
/// memory startup preference at the time of the call.
pub fn create_storage(size: usize, bits: u32) -> Result<Storage, StorageError> {
    Storage::new(size, bits, &preferences::memory_startup())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    use pretty_assertions::assert_eq;

    fn zeroed(size: usize, bits: u32) -> Storage {
        Storage::new(size, bits, &Startup::Zero).unwrap()
    }

    #[test]
    fn test_masks() {
        let tests = vec![
            (1, 0x1),
            (4, 0xf),
            (8, 0xff),
            (12, 0xfff),
            (16, 0xffff),
            (31, 0x7fff_ffff),
            (32, 0xffff_ffff),
        ];

        for (bits, expected) in tests {
            assert_eq!(mask_for_bits(bits), expected, "bits = {}", bits);
            assert_eq!(zeroed(1, bits).mask(), expected, "bits = {}", bits);
        }
    }

    #[test]
    fn test_width_class_selection() {
        let tests = vec![
            (1, WidthClass::Narrow),
            (8, WidthClass::Narrow),
            (9, WidthClass::Medium),
            (16, WidthClass::Medium),
            (17, WidthClass::Wide),
            (32, WidthClass::Wide),
        ];

        for (bits, expected) in tests {
            assert_eq!(zeroed(10, bits).kind(), expected, "bits = {}", bits);
        }
    }

    #[test]
    fn test_container_bits() {
        let bits: Vec<u32> = WidthClass::iter().map(|class| class.container_bits()).collect();
        assert_eq!(bits, vec![8, 16, 32]);
        assert_eq!(WidthClass::Medium.to_string(), "medium");
    }

    #[test]
    fn test_invalid_width() {
        assert_eq!(
            Storage::new(4, 0, &Startup::Zero),
            Err(StorageError::InvalidWidth(0))
        );
        assert_eq!(
            Storage::new(4, 33, &Startup::Zero),
            Err(StorageError::InvalidWidth(33))
        );
    }

    #[test]
    fn test_out_of_range_access() {
        for bits in [8, 16, 32] {
            let mut storage = zeroed(4, bits);
            storage.write(0, 1);
            storage.write(3, 2);
            storage.write(4, 5);
            storage.write(usize::MAX, 5);

            assert_eq!(storage.read(4), 0);
            assert_eq!(storage.read(usize::MAX), 0);
            assert_eq!(storage.cells().collect::<Vec<_>>(), vec![1, 0, 0, 2]);
        }
    }

    #[test]
    fn test_write_then_read() {
        let mut storage = zeroed(4, 8);
        storage.write(0, 0x7f);
        storage.write(1, 0x80);
        storage.write(2, 0xff);

        assert_eq!(storage.read(0), 0x7f);
        // Narrow cells are sign-extended on read
        assert_eq!(storage.read(1), -128);
        assert_eq!(storage.read(2), -1);
        assert_eq!(storage.read_unsigned(1), 0x80);
        assert_eq!(storage.read_unsigned(2), 0xff);
    }

    #[test]
    fn test_medium_and_wide_sign_extension() {
        let mut medium = zeroed(2, 16);
        medium.write(0, 0xbeef);
        assert_eq!(medium.read(0), 0xbeef_u16 as i16 as i32);
        assert_eq!(medium.read_unsigned(0), 0xbeef);

        let mut wide = zeroed(2, 32);
        wide.write(1, 0xdead_beef_u32 as i32);
        assert_eq!(wide.read_unsigned(1), 0xdead_beef);
    }

    #[test]
    fn test_write_truncates_to_container() {
        let mut storage = zeroed(1, 4);
        storage.write(0, 0x1_23);
        assert_eq!(storage.read(0), 0x23);
        assert_eq!(storage.read_unsigned(0), 0x3);
    }

    #[test]
    fn test_bulk_load_truncated_to_capacity() {
        let mut storage = zeroed(4, 4);
        storage.load(0, &[1, 2, 3, 4, 5], 0xf);
        assert_eq!(storage.cells().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bulk_load_offset_same_for_every_width() {
        for bits in [8, 16, 32] {
            let mut storage = zeroed(5, bits);
            storage.load(2, &[0x11, 0x22, 0x33, 0x44], 0x3f);
            assert_eq!(
                storage.cells().collect::<Vec<_>>(),
                vec![0, 0, 0x11, 0x22, 0x33],
                "bits = {}",
                bits
            );
        }
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = zeroed(3, 12);
        original.load(0, &[1, 2, 3], 0xfff);

        let mut copy = original.duplicate();
        assert_eq!(copy, original);
        assert_eq!(copy.kind(), WidthClass::Medium);

        copy.write(0, 0xabc);
        original.write(2, 0x123);
        assert_eq!(original.cells().collect::<Vec<_>>(), vec![1, 2, 0x123]);
        assert_eq!(copy.cells().collect::<Vec<_>>(), vec![0xabc, 2, 3]);
    }

    #[test]
    fn test_zero_startup() {
        let storage = zeroed(100, 8);
        assert!(storage.cells().all(|cell| cell == 0));
    }

    #[test]
    fn test_unknown_startup() {
        let unknown = Startup::Unknown { seed: None };
        let a = Storage::new(100, 8, &unknown).unwrap();
        let b = Storage::new(100, 8, &unknown).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_startup_is_reproducible() {
        let seeded = Startup::Unknown { seed: Some(7) };
        let a = Storage::new(64, 12, &seeded).unwrap();
        let b = Storage::new(64, 12, &seeded).unwrap();
        assert_eq!(a, b);
        assert!(a.cells().all(|cell| (0..=0xfff).contains(&cell)));
    }

    #[test]
    fn test_empty_storage() {
        let mut storage = zeroed(0, 20);
        storage.write(0, 1);
        storage.load(0, &[1, 2], 0xff);
        assert!(storage.is_empty());
        assert_eq!(storage.read(0), 0);
    }
}
