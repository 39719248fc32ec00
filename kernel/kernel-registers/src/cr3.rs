use crate::{LoadRegisterUnsafe, StoreRegisterUnsafe};
use bitfield_struct::bitfield;
use kernel_addresses::PhysicalAddress;

/// CR3 — page-table root register (IA-32e, PCID disabled).
///
/// Holds the physical base of the PML4 and the cache-control bits used when
/// walking it. Rewriting CR3 with its current value flushes every non-global
/// TLB entry on the current CPU, which is how the TLB layer implements its
/// non-global flush.
#[bitfield(u64)]
pub struct Cr3 {
    /// Bits 0–2 — Reserved (must be 0).
    #[bits(3)]
    pub reserved0: u8,

    /// Bit 3 — PWT: write-through caching for PML4 accesses.
    pub pwt: bool,

    /// Bit 4 — PCD: cache disable for PML4 accesses.
    pub pcd: bool,

    /// Bits 5–11 — Reserved (must be 0 when written).
    #[bits(7)]
    pub reserved1: u8,

    /// Bits 12–51 — PML4 physical base >> 12.
    #[bits(40)]
    pml4_base_4k: u64,

    /// Bits 52–63 — Reserved.
    #[bits(12)]
    pub reserved2: u16,
}

impl Cr3 {
    /// Create a `Cr3` value from a 4 KiB-aligned PML4 physical base.
    #[must_use]
    pub fn from_pml4_phys(pml4_phys: PhysicalAddress, pwt: bool, pcd: bool) -> Self {
        debug_assert!(pml4_phys.is_page_aligned(), "PML4 base must be 4K-aligned");
        Self::new()
            .with_pwt(pwt)
            .with_pcd(pcd)
            .with_pml4_base_4k(pml4_phys.as_u64() >> 12)
    }

    /// Full physical address of the PML4 base.
    #[must_use]
    pub fn pml4_phys(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.pml4_base_4k() << 12)
    }
}

#[cfg(feature = "asm")]
impl LoadRegisterUnsafe for Cr3 {
    unsafe fn load_unsafe() -> Self {
        let cr3: u64;
        unsafe {
            core::arch::asm!("mov {}, cr3", out(reg) cr3, options(nomem, nostack, preserves_flags));
        }
        Self::from_bits(cr3)
    }
}

#[cfg(feature = "asm")]
impl StoreRegisterUnsafe for Cr3 {
    unsafe fn store_unsafe(self) {
        let cr3 = self.into_bits();
        unsafe {
            core::arch::asm!("mov cr3, {}", in(reg) cr3, options(nostack, preserves_flags));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pml4_base_round_trips() {
        let pa = PhysicalAddress::new(0x0000_0012_3456_7000);
        let cr3 = Cr3::from_pml4_phys(pa, false, false);
        assert_eq!(cr3.pml4_phys(), pa);
        assert_eq!(cr3.into_bits(), pa.as_u64());
    }

    #[test]
    fn cache_bits_encode() {
        let pa = PhysicalAddress::new(0x1000);
        let cr3 = Cr3::from_pml4_phys(pa, true, true);
        assert_eq!(cr3.into_bits() & 0x18, 0x18);
    }
}
