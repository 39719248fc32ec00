//! # 16-bit bootstrap trampoline
//!
//! Waking an application processor (or resuming from S3) starts the CPU in
//! real mode, so a small trampoline must sit in identity-mapped low memory
//! and carry it through to long mode. This module fixes the trampoline's
//! data layout and the seam through which the platform code hands out the
//! low-memory aperture; the trampoline code itself is assembly owned by the
//! boot subsystem.

use kernel_addresses::{PhysicalAddress, VirtualAddress};

use crate::status::ArchResult;

/// Byte offsets into the bootstrap data block, fixed by the 16-bit assembly.
pub mod layout {
    /// Physical address of the identity-mapped bootstrap PML4.
    pub const BCD_PHYS_BOOTSTRAP_PML4_OFFSET: usize = 0;
    /// Physical address of the kernel PML4.
    pub const BCD_PHYS_KERNEL_PML4_OFFSET: usize = 4;
    /// GDTR image (16-bit limit, 64-bit base).
    pub const BCD_PHYS_GDTR_OFFSET: usize = 8;
    /// Physical address of the long-mode entry point; consumed by `retfl`
    /// together with the code segment that follows it.
    pub const BCD_PHYS_LM_ENTRY_OFFSET: usize = 20;
    /// 64-bit code segment selector for the far return into long mode.
    pub const BCD_LM_CS_OFFSET: usize = 24;
    /// Counter APs increment to claim a stack.
    pub const BCD_CPU_COUNTER_OFFSET: usize = 28;
    /// Pointer to the still-booting mask the BSP watches.
    pub const BCD_CPU_WAITING_OFFSET: usize = 32;
    /// Start of the per-AP data array (kernel stack base, thread pointer).
    pub const BCD_PER_CPU_BASE_OFFSET: usize = 40;
}

/// The trampoline must be reachable by a real-mode far jump: below 1 MiB.
pub const BOOTSTRAP16_MAX_PHYS: u64 = 1 << 20;

/// A leased low-memory trampoline, produced by [`Bootstrap16::acquire`].
#[derive(Debug)]
pub struct Bootstrap16Grant {
    /// Kernel-virtual aperture onto the trampoline pages; the caller writes
    /// the data block through this before starting the target CPU.
    pub aperture: VirtualAddress,
    /// Physical base of the trampoline, 4 KiB aligned and below
    /// [`BOOTSTRAP16_MAX_PHYS`].
    pub trampoline_phys: PhysicalAddress,
    /// Real-mode instruction pointer the target CPU starts at.
    pub entry16: u16,
}

/// Lease and return of the low-memory trampoline region.
///
/// Implemented by the platform code that owns low physical memory; acquire
/// installs the identity mapping and copies the trampoline assembly, release
/// tears both down.
pub trait Bootstrap16 {
    /// Prepare the trampoline with `entry64` as the long-mode continuation
    /// and lease it to the caller.
    fn acquire(&mut self, entry64: PhysicalAddress) -> ArchResult<Bootstrap16Grant>;

    /// Return a leased trampoline.
    ///
    /// The target CPU must be past the trampoline (or never started) before
    /// its pages are reused.
    fn release(&mut self, grant: Bootstrap16Grant);
}

#[cfg(test)]
mod tests {
    use super::layout::*;

    #[test]
    fn data_block_offsets_are_packed_in_order() {
        assert_eq!(BCD_PHYS_BOOTSTRAP_PML4_OFFSET, 0);
        assert_eq!(BCD_PHYS_KERNEL_PML4_OFFSET, 4);
        assert_eq!(BCD_PHYS_GDTR_OFFSET, 8);
        assert_eq!(BCD_PHYS_LM_ENTRY_OFFSET, 20);
        // The entry point and code segment must be adjacent for retfl.
        assert_eq!(BCD_LM_CS_OFFSET, BCD_PHYS_LM_ENTRY_OFFSET + 4);
        assert!(BCD_CPU_COUNTER_OFFSET < BCD_CPU_WAITING_OFFSET);
        assert!(BCD_CPU_WAITING_OFFSET < BCD_PER_CPU_BASE_OFFSET);
    }
}
