/// Fixed-width memory cell storage.
///
/// A storage unit is a fixed-length block of cells that are all `bits` wide
/// (1 to 32). The backing store is picked once from the width:
/// - **Narrow** - up to 8 bits, one byte per cell
/// - **Medium** - 9 to 16 bits, two bytes per cell
/// - **Wide** - 17 to 32 bits, four bytes per cell
pub mod storage;

/// Process-wide memory preferences.
pub mod preferences;

/// Hexdump utility
pub mod hexdump;

/// Command line inspection of storage units.
pub mod inspect;

/// Logging and chrome tracing setup.
pub mod instrumentation;
