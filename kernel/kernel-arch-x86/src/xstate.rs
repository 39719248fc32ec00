//! # Extended register state (FXSAVE/XSAVE)

#[cfg(feature = "asm")]
use kernel_registers::{LoadRegisterUnsafe, StoreRegisterUnsafe, cr4::Cr4};
use kernel_registers::xcr0::Xcr0;

/// Size of the legacy FXSAVE/FXRSTOR area.
pub const FXSAVE_AREA_SIZE: usize = 512;

/// Size of the AVX component (upper YMM halves) appended by XSAVE.
pub const XSAVE_AVX_COMPONENT_SIZE: usize = 256;

/// Bring up SSE/AVX support on the current CPU: set CR4.OSFXSR and
/// CR4.OSXSAVE, then reset the x87 control word with `fninit`.
///
/// Runs once per CPU before the first FXSAVE/XSAVE.
///
/// # Safety
/// Privileged. Setting OSXSAVE on a CPU without XSAVE raises #GP; the boot
/// path probes [`crate::cpuid::xsave_supported`] first. Not preemption-safe
/// around the CR4 read-modify-write.
#[cfg(feature = "asm")]
pub unsafe fn extended_register_init() {
    unsafe {
        let cr4 = Cr4::load_unsafe().with_osfxsr(true).with_osxsave(true);
        cr4.store_unsafe();
        core::arch::asm!("fninit", options(nostack, preserves_flags));
    }
}

/// Size in bytes of the per-thread extended-register save area.
///
/// # Safety
/// `xgetbv` requires CR4.OSXSAVE; call after [`extended_register_init`].
#[cfg(feature = "asm")]
#[must_use]
pub unsafe fn extended_register_size() -> usize {
    if !crate::cpuid::xsave_supported() {
        return FXSAVE_AREA_SIZE;
    }
    let xcr0 = unsafe { Xcr0::load_unsafe() };
    xsave_area_size(true, xcr0)
}

/// The save-area arithmetic behind [`extended_register_size`]: the legacy
/// 512-byte region, plus 256 bytes when the AVX component is enabled.
///
/// CPUID.0DH:ECX would report the exact layout; the component sum matches it
/// for the states this kernel enables.
#[must_use]
pub const fn xsave_area_size(has_xsave: bool, xcr0: Xcr0) -> usize {
    if !has_xsave {
        return FXSAVE_AREA_SIZE;
    }
    let mut size = FXSAVE_AREA_SIZE;
    if xcr0.avx() {
        size += XSAVE_AVX_COMPONENT_SIZE;
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_xsave_is_legacy_size() {
        let xcr0 = Xcr0::new().with_x87(true).with_sse(true).with_avx(true);
        assert_eq!(xsave_area_size(false, xcr0), 512);
    }

    #[test]
    fn xsave_without_avx() {
        let xcr0 = Xcr0::new().with_x87(true).with_sse(true);
        assert_eq!(xsave_area_size(true, xcr0), 512);
    }

    #[test]
    fn xsave_with_avx() {
        let xcr0 = Xcr0::new().with_x87(true).with_sse(true).with_avx(true);
        assert_eq!(xsave_area_size(true, xcr0), 768);
    }
}
