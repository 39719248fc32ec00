//! # CPUID feature probing
//!
//! Leaf 0 is deliberately out of reach here: it is reserved for
//! [`crate::asm::serialize`], so probes cannot collide with the serializer's
//! fixed input. Callers that want the vendor string go through the boot-time
//! feature snapshot instead.

/// The four output registers of a `cpuid` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuidResult {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

/// Execute `cpuid` for `leaf`/`subleaf`.
///
/// Returns `None` for leaf 0 without executing the instruction.
#[cfg(feature = "asm")]
#[must_use]
pub fn cpuid(leaf: u32, subleaf: u32) -> Option<CpuidResult> {
    if leaf == 0 {
        return None;
    }
    Some(cpuid_raw(leaf, subleaf))
}

/// Whether the CPU supports XSAVE/XRSTOR (CPUID.01H:ECX bit 26).
#[cfg(feature = "asm")]
#[must_use]
pub fn xsave_supported() -> bool {
    cpuid(0x01, 0).is_some_and(|r| r.ecx & (1 << 26) != 0)
}

// rbx is reserved by the code generator, so it is saved into a scratch
// register and swapped back around the instruction; the swap leaves cpuid's
// ebx output in the scratch register.
#[cfg(feature = "asm")]
#[allow(clippy::cast_possible_truncation)]
fn cpuid_raw(leaf: u32, subleaf: u32) -> CpuidResult {
    let eax: u32;
    let ebx: u64;
    let ecx: u32;
    let edx: u32;
    unsafe {
        core::arch::asm!(
            "mov {tmp:r}, rbx",
            "cpuid",
            "xchg {tmp:r}, rbx",
            tmp = out(reg) ebx,
            inout("eax") leaf => eax,
            inout("ecx") subleaf => ecx,
            out("edx") edx,
            options(nostack, preserves_flags)
        );
    }
    CpuidResult {
        eax,
        ebx: ebx as u32,
        ecx,
        edx,
    }
}

#[cfg(all(test, feature = "asm"))]
mod tests {
    use super::*;

    #[test]
    fn leaf_0_is_rejected() {
        assert!(cpuid(0, 0).is_none());
        assert!(cpuid(0, 7).is_none());
    }

    #[test]
    fn leaf_1_reports_something() {
        let leaf = cpuid(1, 0).unwrap();
        // Family/model/stepping are never all-zero on real or virtual CPUs.
        assert_ne!(leaf.eax, 0);
    }
}
