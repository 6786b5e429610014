//! Unit conversion utilities.
//!
//! Drawing sizes are stored in English Metric Units (EMU), while decoded
//! images report pixels.

pub const EMUS_PER_INCH: u64 = 914_400;
pub const EMUS_PER_PT: u64 = 12_700;

/// Screen resolution Word assumes for pixel sizes
pub const DEFAULT_DPI: u32 = 96;

/// EMUs per pixel at [`DEFAULT_DPI`]
pub const EMUS_PER_PX: u64 = EMUS_PER_INCH / DEFAULT_DPI as u64;

/// Convert pixels at `dpi` to EMUs. A zero `dpi` is treated as 96.
#[inline]
pub fn px_to_emu_at(px: u32, dpi: u32) -> u64 {
    let dpi = if dpi == 0 { DEFAULT_DPI } else { dpi };
    u64::from(px) * EMUS_PER_INCH / u64::from(dpi)
}

/// Convert pixels at 96 DPI to EMUs.
#[inline]
pub fn px_to_emu(px: u32) -> u64 {
    u64::from(px) * EMUS_PER_PX
}

/// Convert EMUs to whole pixels at 96 DPI, rounding down.
#[inline]
pub fn emu_to_px(emu: u64) -> u64 {
    emu / EMUS_PER_PX
}

#[inline]
pub fn pt_to_emu(pt: u32) -> u64 {
    u64::from(pt) * EMUS_PER_PT
}
