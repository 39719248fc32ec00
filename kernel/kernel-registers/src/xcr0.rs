use crate::{LoadRegisterUnsafe, StoreRegisterUnsafe};
use bitfield_struct::bitfield;

/// XCR0 — XSAVE feature-enable mask, read and written via `xgetbv`/`xsetbv`.
///
/// Each set bit enables one XSAVE state component and grows the save area.
/// The extended-register size calculation only consults the AVX bit; the
/// remaining components are modeled for completeness.
#[bitfield(u64)]
pub struct Xcr0 {
    /// Bit 0 — x87 FPU state. Architecturally always 1.
    pub x87: bool,

    /// Bit 1 — SSE state (XMM registers, MXCSR).
    pub sse: bool,

    /// Bit 2 — AVX state (upper halves of the YMM registers).
    ///
    /// When enabled, the XSAVE area carries an extra 256 bytes beyond the
    /// legacy FXSAVE region.
    pub avx: bool,

    /// Bits 3–4 — MPX state (BNDREG/BNDCSR).
    #[bits(2)]
    pub mpx: u8,

    /// Bits 5–7 — AVX-512 state (opmask, `ZMM_Hi256`, `Hi16_ZMM`).
    #[bits(3)]
    pub avx512: u8,

    /// Bit 8 — PT state (supervisor).
    pub pt: bool,

    /// Bit 9 — PKRU state.
    pub pkru: bool,

    /// Bits 10–63 — Reserved / further components.
    #[bits(54)]
    pub reserved: u64,
}

#[cfg(feature = "asm")]
impl LoadRegisterUnsafe for Xcr0 {
    /// # Safety
    /// `xgetbv` faults with #UD unless CR4.OSXSAVE is set.
    unsafe fn load_unsafe() -> Self {
        let lo: u32;
        let hi: u32;
        unsafe {
            core::arch::asm!(
                "xgetbv",
                in("ecx") 0u32,
                out("eax") lo,
                out("edx") hi,
                options(nomem, nostack, preserves_flags)
            );
        }
        Self::from_bits((u64::from(hi) << 32) | u64::from(lo))
    }
}

#[cfg(feature = "asm")]
impl StoreRegisterUnsafe for Xcr0 {
    /// # Safety
    /// `xsetbv` is privileged and faults on reserved-bit violations.
    unsafe fn store_unsafe(self) {
        let bits = self.into_bits();
        let lo = (bits & 0xFFFF_FFFF) as u32;
        let hi = (bits >> 32) as u32;
        unsafe {
            core::arch::asm!(
                "xsetbv",
                in("ecx") 0u32,
                in("eax") lo,
                in("edx") hi,
                options(nomem, nostack, preserves_flags)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avx_is_bit_2() {
        assert_eq!(Xcr0::new().with_avx(true).into_bits(), 0x4);
    }

    #[test]
    fn legacy_sse_mask() {
        let xcr0 = Xcr0::new().with_x87(true).with_sse(true);
        assert_eq!(xcr0.into_bits(), 0x3);
        assert!(!xcr0.avx());
    }
}
