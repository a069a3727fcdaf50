use std::fmt;

use rand::Rng;

use super::{startup::Startup, StorageUnit};

/// Native container for a single memory cell.
pub trait Cell: Copy + Default + Eq + fmt::Debug {
    /// Width of the container in bits.
    const BITS: u32;

    /// Truncates a word to the container width.
    fn truncate(word: i32) -> Self;

    /// Sign-extends the container back to a word.
    fn widen(self) -> i32;

    /// A random value no wider than the container, masked to `mask`.
    fn random<R: Rng>(rng: &mut R, mask: u32) -> Self {
        let raw = if Self::BITS >= u32::BITS {
            rng.gen::<u32>()
        } else {
            rng.gen_range(0..1u32 << Self::BITS)
        };
        Self::truncate((raw & mask) as i32)
    }
}

macro_rules! impl_cell {
    ($($ty:ty),*) => {
        $(
            impl Cell for $ty {
                const BITS: u32 = <$ty>::BITS;

                fn truncate(word: i32) -> Self {
                    word as $ty
                }

                fn widen(self) -> i32 {
                    self as i32
                }
            }
        )*
    };
}

impl_cell!(i8, i16, i32);

/// A fixed-length block of cells stored in container `C`.
#[derive(Clone, PartialEq, Eq)]
pub struct Page<C: Cell> {
    data: Box<[C]>,
    mask: u32,
}

impl<C: Cell> Page<C> {
    #[tracing::instrument]
    pub fn new(size: usize, mask: u32, startup: &Startup) -> Self {
        let mut data = vec![C::default(); size].into_boxed_slice();
        if let Some(mut rng) = startup.rng() {
            data.iter_mut().for_each(|cell| *cell = C::random(&mut rng, mask));
        }
        Self { data, mask }
    }

    /// All cell values in address order, sign-extended from the container.
    pub fn cells(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().map(|cell| cell.widen())
    }
}

impl<C: Cell> fmt::Debug for Page<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("cell_bits", &C::BITS)
            .field("len", &self.data.len())
            .field("mask", &format_args!("{:#x}", self.mask))
            .finish()
    }
}

impl<C: Cell> StorageUnit for Page<C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn mask(&self) -> u32 {
        self.mask
    }

    fn read(&self, address: usize) -> i32 {
        self.data.get(address).map_or(0, |cell| cell.widen())
    }

    fn write(&mut self, address: usize, value: i32) {
        if let Some(cell) = self.data.get_mut(address) {
            *cell = C::truncate(value);
        }
    }

    /// Copies `values[0..]` into `start..`, stopping at whichever runs out first.
    #[tracing::instrument(skip(values), fields(count = values.len()))]
    fn load(&mut self, start: usize, values: &[i32], mask: u32) {
        self.data
            .iter_mut()
            .skip(start)
            .zip(values)
            .for_each(|(cell, value)| *cell = C::truncate((*value as u32 & mask) as i32));
    }
}
