//! Non-volatile storage abstraction
//!
//! Used to persist the sponge PRNG's seed across power cycles. Modeled
//! on a raw flash/EEPROM access pattern (page-aligned writes, optional
//! erase-before-write) rather than a filesystem, since the intended
//! targets for this trait are embedded devices without one.

/// Describes how to read and write a region of non-volatile storage.
pub trait Storage {
    /// Size of a page, the minimum writable unit. The minimum readable
    /// unit is always 1 byte.
    fn page_size(&self) -> usize;

    /// Size of an erase block, the minimum erasable unit. Zero if the
    /// medium never needs erasing before a write (e.g. EEPROM).
    fn erase_size(&self) -> usize;

    /// Total size of the storage region in bytes. Must be a multiple of
    /// both `page_size` and `erase_size` (when `erase_size` is nonzero).
    fn size(&self) -> usize;

    /// `true` if bits can be written without erasing first (flash that
    /// supports 1-to-0 transitions in place).
    fn supports_partial_writes(&self) -> bool;

    /// Read `data.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes actually read, or `None` on error.
    fn read(&self, offset: usize, data: &mut [u8]) -> Option<usize>;

    /// Write `data.len()` bytes starting at `offset`, which must be a
    /// multiple of `page_size`. If `erase` is `true`, the destination
    /// region is erased before writing.
    ///
    /// Returns the number of bytes actually written, or `None` on error.
    fn write(&mut self, offset: usize, data: &[u8], erase: bool) -> Option<usize>;
}
