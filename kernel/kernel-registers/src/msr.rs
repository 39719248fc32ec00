//! # Model-Specific Register (MSR) access
//!
//! A thin [`Msr`] index type over the privileged `rdmsr`/`wrmsr` instruction
//! pair, plus typed models for the MSRs the memory-attribute code programs:
//! [`Ia32Pat`](ia32_pat::Ia32Pat), [`Ia32MtrrCap`](ia32_mtrr::Ia32MtrrCap)
//! and [`Ia32MtrrDefType`](ia32_mtrr::Ia32MtrrDefType).
//!
//! The remaining architectural indices this layer's callers rely on (segment
//! bases, syscall entry MSRs, EFER) are published as associated constants;
//! their field layouts belong to the GDT/syscall subsystems.
//!
//! Accessing an MSR the CPU does not implement raises #GP(0); nothing here
//! catches that, it propagates to the kernel's trap handler.

mod ia32_mtrr;
mod ia32_pat;

pub use ia32_mtrr::{Ia32MtrrCap, Ia32MtrrDefType};
pub use ia32_pat::{Ia32Pat, MemoryType};

/// Identifies a Model-Specific Register by its architectural index.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msr(pub u32);

impl Msr {
    /// `IA32_PAT` — Page Attribute Table.
    pub const IA32_PAT: Self = Self(0x277);
    /// `IA32_MTRRCAP` — MTRR capability report (read-only).
    pub const IA32_MTRRCAP: Self = Self(0xFE);
    /// `IA32_MTRR_DEF_TYPE` — MTRR default memory type and enables.
    pub const IA32_MTRR_DEF_TYPE: Self = Self(0x2FF);
    /// `IA32_EFER` — Extended Feature Enable Register.
    pub const IA32_EFER: Self = Self(0xC000_0080);
    /// `IA32_STAR` — syscall segment selectors.
    pub const IA32_STAR: Self = Self(0xC000_0081);
    /// `IA32_LSTAR` — 64-bit syscall entry RIP.
    pub const IA32_LSTAR: Self = Self(0xC000_0082);
    /// `IA32_CSTAR` — compatibility-mode syscall entry RIP.
    pub const IA32_CSTAR: Self = Self(0xC000_0083);
    /// `IA32_FMASK` — RFLAGS mask applied on syscall.
    pub const IA32_FMASK: Self = Self(0xC000_0084);
    /// `IA32_FS_BASE` — FS segment base.
    pub const IA32_FS_BASE: Self = Self(0xC000_0100);
    /// `IA32_GS_BASE` — active GS segment base.
    pub const IA32_GS_BASE: Self = Self(0xC000_0101);
    /// `IA32_KERNEL_GS_BASE` — `swapgs` shadow of the GS base.
    pub const IA32_KERNEL_GS_BASE: Self = Self(0xC000_0102);
    /// `IA32_TSC_AUX` — RDTSCP auxiliary value (CPU number by convention).
    pub const IA32_TSC_AUX: Self = Self(0xC000_0103);

    /// Creates a new `Msr` from a raw index.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying raw MSR index.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Write a 64-bit value to this MSR via `wrmsr`.
    ///
    /// # Safety
    /// - `wrmsr` is only valid at CPL 0; elsewhere it raises #GP(0).
    /// - The MSR must exist and be writable on the current CPU.
    /// - Callers own any cross-CPU agreement the MSR requires (e.g. PAT
    ///   consistency across the system).
    #[cfg(feature = "asm")]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    #[doc(alias = "wrmsr")]
    pub unsafe fn store_raw(self, val: u64) {
        let lo = (val & 0xFFFF_FFFF) as u32;
        let hi = (val >> 32) as u32;
        let msr = self.raw();
        unsafe {
            core::arch::asm!(
                "wrmsr",
                in("ecx") msr,
                in("eax") lo,
                in("edx") hi,
                options(nostack, preserves_flags)
            );
        }
    }

    /// Read the 64-bit value of this MSR via `rdmsr`.
    ///
    /// # Safety
    /// `rdmsr` is only valid at CPL 0 and only for implemented MSRs.
    #[cfg(feature = "asm")]
    #[inline(always)]
    #[allow(clippy::inline_always)]
    #[doc(alias = "rdmsr")]
    pub unsafe fn load_raw(self) -> u64 {
        let lo: u32;
        let hi: u32;
        let ecx = self.raw();
        unsafe {
            core::arch::asm!(
                "rdmsr",
                in("ecx") ecx,
                out("eax") lo,
                out("edx") hi,
                options(nomem, nostack, preserves_flags)
            );
        }
        (u64::from(hi) << 32) | u64::from(lo)
    }
}

#[cfg(test)]
mod tests {
    use super::Msr;

    #[test]
    fn architectural_indices() {
        assert_eq!(Msr::IA32_PAT.raw(), 0x277);
        assert_eq!(Msr::IA32_MTRRCAP.raw(), 0xFE);
        assert_eq!(Msr::IA32_MTRR_DEF_TYPE.raw(), 0x2FF);
        assert_eq!(Msr::IA32_EFER.raw(), 0xC000_0080);
        assert_eq!(Msr::IA32_STAR.raw(), 0xC000_0081);
        assert_eq!(Msr::IA32_LSTAR.raw(), 0xC000_0082);
        assert_eq!(Msr::IA32_CSTAR.raw(), 0xC000_0083);
        assert_eq!(Msr::IA32_FMASK.raw(), 0xC000_0084);
        assert_eq!(Msr::IA32_FS_BASE.raw(), 0xC000_0100);
        assert_eq!(Msr::IA32_GS_BASE.raw(), 0xC000_0101);
        assert_eq!(Msr::IA32_KERNEL_GS_BASE.raw(), 0xC000_0102);
        assert_eq!(Msr::IA32_TSC_AUX.raw(), 0xC000_0103);
    }
}
