use crate::storage::StorageUnit;

/// Hexdump the cells of a storage unit, `stride` cells per line, each line
/// prefixed with the address of its first cell.
///
/// Cells are printed unsigned, masked to the configured width and padded to
/// the number of hex digits the mask needs.
pub fn hexdump(
    unit: &impl StorageUnit,
    base_address: usize,
    addr_width: usize,
    stride: usize,
) -> String {
    fn addr(str: &mut String, offset: usize, addr_width: usize) {
        if !str.is_empty() {
            str.push('\n');
        }
        str.push_str(format!("{:0width$x}:", offset, width = addr_width).as_str());
    }

    let stride = stride.max(1);
    let cell_width = cell_digits(unit.mask());
    let mut str = String::new();

    for address in 0..unit.len() {
        if address % stride == 0 {
            addr(&mut str, base_address + address, addr_width);
        }
        str.push(' ');
        str.push_str(
            format!(
                "{:0width$x}",
                unit.read_unsigned(address),
                width = cell_width
            )
            .as_str(),
        );
    }

    str
}

/// Hex digits needed to print any value covered by `mask`.
fn cell_digits(mask: u32) -> usize {
    let bits = u32::BITS - mask.leading_zeros();
    (bits.max(1) as usize + 3) / 4
}
