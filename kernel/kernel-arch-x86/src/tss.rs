//! # Task State Segment hooks
//!
//! The TSS itself lives in per-CPU memory set up by the boot assembly; the
//! descriptor subsystem manipulates it through these seams. The bodies stay
//! empty until that per-CPU memory is plumbed through to this layer.

use kernel_addresses::VirtualAddress;

/// Bytes in a full I/O permission bitmap (one bit per port, 65536 ports).
pub const IO_BITMAP_BYTES: usize = 65536 / 8;

/// An I/O permission bitmap; a clear bit grants access to the port.
pub type IoBitmap = [u8; IO_BITMAP_BYTES];

/// Point the current CPU's TSS RSP0 at `stack_top`, the kernel stack used
/// on ring transitions.
pub fn set_sp0(stack_top: VirtualAddress) {
    log::trace!("tss: sp0 <- {stack_top}");
}

/// Clear the busy bit of the TSS descriptor named by `selector`, ahead of
/// an `ltr` re-load.
pub fn clear_busy(selector: u16) {
    log::trace!("tss: clearing busy bit of selector {selector:#x}");
}

/// Install `bitmap` as the current CPU's I/O permission bitmap.
pub fn set_io_bitmap(bitmap: &IoBitmap) {
    let _ = bitmap;
}

/// Remove `bitmap`'s grants from the current CPU's I/O permission bitmap.
pub fn clear_io_bitmap(bitmap: &IoBitmap) {
    let _ = bitmap;
}

/// Reset the current CPU's I/O permission bitmap to deny-all.
pub fn reset_io_bitmap() {}
