use crate::{LoadRegisterUnsafe, StoreRegisterUnsafe};
use bitfield_struct::bitfield;

/// CR0 — primary control register in 64-bit mode.
///
/// The MMU layer cares mostly about WP: once set, supervisor writes to
/// read-only pages fault, which is what keeps kernel text immutable after
/// early boot. Reserved bits are modeled but forced to 0.
#[bitfield(u64)]
pub struct Cr0 {
    /// Bit 0 — Protection Enable (PE). Required for paging / long mode.
    pub pe_protection_enable: bool,

    /// Bit 1 — Monitor Coprocessor (MP). WAIT/FWAIT interaction with TS.
    pub mp_monitor_coprocessor: bool,

    /// Bit 2 — Emulation (EM). When set, x87 instructions fault.
    pub em_emulation: bool,

    /// Bit 3 — Task Switched (TS). Lazy x87/SSE state management.
    pub ts_task_switched: bool,

    /// Bit 4 — Extension Type (ET). Effectively reserved-1 on modern CPUs.
    pub et_extension_type: bool,

    /// Bit 5 — Numeric Error (NE). x87 errors via #MF rather than IRQ 13.
    pub ne_numeric_error: bool,

    /// Bits 6–15 — Reserved (must be 0).
    #[bits(10, default = 0)]
    _reserved_6_15: u16,

    /// Bit 16 — Write Protect (WP).
    ///
    /// When set, supervisor code must respect read-only pages; when clear,
    /// ring 0 may write them regardless of the RW bit.
    pub wp_write_protect: bool,

    /// Bit 17 — Reserved (must be 0).
    #[bits(default = 0)]
    _reserved_17: bool,

    /// Bit 18 — Alignment Mask (AM). With RFLAGS.AC, ring-3 #AC checks.
    pub am_alignment_mask: bool,

    /// Bits 19–28 — Reserved (must be 0).
    #[bits(10, default = 0)]
    _reserved_19_28: u16,

    /// Bit 29 — Not-Write-Through (NW).
    pub nw_not_write_through: bool,

    /// Bit 30 — Cache Disable (CD).
    pub cd_cache_disable: bool,

    /// Bit 31 — Paging (PG). Requires PE=1.
    pub pg_paging: bool,

    /// Bits 32–63 — Reserved (must be 0).
    #[bits(32, default = 0)]
    _reserved_32_63: u32,
}

#[cfg(feature = "asm")]
impl LoadRegisterUnsafe for Cr0 {
    unsafe fn load_unsafe() -> Self {
        let cr0: u64;
        unsafe {
            core::arch::asm!("mov {}, cr0", out(reg) cr0, options(nomem, nostack, preserves_flags));
        }
        Self::from_bits(cr0)
    }
}

#[cfg(feature = "asm")]
impl StoreRegisterUnsafe for Cr0 {
    unsafe fn store_unsafe(self) {
        let cr0 = self.into_bits();
        unsafe {
            core::arch::asm!("mov cr0, {}", in(reg) cr0, options(nostack, preserves_flags));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wp_is_bit_16() {
        let cr0 = Cr0::new().with_wp_write_protect(true);
        assert_eq!(cr0.into_bits(), 1 << 16);
    }

    #[test]
    fn set_wp_preserves_other_bits() {
        let boot = Cr0::from_bits(0x8000_0033); // PG | PE | MP | ET | NE
        let after = boot.with_wp_write_protect(true);
        assert_eq!(after.into_bits(), 0x8001_0033);
        assert!(after.pg_paging());
        assert!(after.pe_protection_enable());
    }
}
