//! # Instruction primitives
//!
//! One wrapper per machine instruction. None of these fail; the privileged
//! ones raise #GP/#UD at insufficient privilege, and that propagates to the
//! kernel's trap handler rather than being caught here.

#[cfg(feature = "asm")]
use kernel_addresses::VirtualAddress;

/// Disable maskable interrupts on the current CPU (`cli`).
///
/// # Safety
/// The caller takes responsibility for re-enabling interrupts; leaving them
/// off starves the local timer and IPIs.
#[cfg(feature = "asm")]
#[inline]
pub unsafe fn disable_interrupts() {
    unsafe {
        core::arch::asm!("cli", options(nomem, nostack));
    }
}

/// Enable maskable interrupts on the current CPU (`sti`).
///
/// # Safety
/// Interrupt handlers may run immediately after the following instruction;
/// any state they observe must be consistent.
#[cfg(feature = "asm")]
#[inline]
pub unsafe fn enable_interrupts() {
    unsafe {
        core::arch::asm!("sti", options(nomem, nostack));
    }
}

/// Halt until the next interrupt (`hlt`), once.
///
/// # Safety
/// Privileged. With interrupts disabled this never wakes except for NMI/SMI.
#[cfg(feature = "asm")]
#[inline]
pub unsafe fn halt() {
    unsafe {
        core::arch::asm!("hlt", options(nomem, nostack, preserves_flags));
    }
}

/// Spin-wait hint (`pause`); de-pipelines busy loops and yields to the
/// sibling hyperthread.
#[cfg(feature = "asm")]
#[inline]
pub fn pause() {
    unsafe {
        core::arch::asm!("pause", options(nomem, nostack, preserves_flags));
    }
}

/// Serialize instruction execution by issuing `cpuid` with leaf 0.
///
/// The outputs are discarded; leaf 0 is reserved for this use, which is why
/// [`crate::cpuid::cpuid`] refuses it.
#[cfg(feature = "asm")]
#[inline]
pub fn serialize() {
    unsafe {
        core::arch::asm!(
            "mov {tmp:r}, rbx",
            "cpuid",
            "xchg {tmp:r}, rbx",
            tmp = out(reg) _,
            inout("eax") 0u32 => _,
            out("ecx") _,
            out("edx") _,
            options(nostack, preserves_flags)
        );
    }
}

/// Read the time-stamp counter (`rdtsc`), unserialized.
///
/// The CPU may reorder this against surrounding instructions; pair with
/// [`serialize`] or a fence when measuring.
#[cfg(feature = "asm")]
#[inline]
#[must_use]
pub fn rdtsc() -> u64 {
    let lo: u32;
    let hi: u32;
    unsafe {
        core::arch::asm!(
            "rdtsc",
            out("eax") lo,
            out("edx") hi,
            options(nomem, nostack, preserves_flags)
        );
    }
    (u64::from(hi) << 32) | u64::from(lo)
}

/// Invalidate the TLB entry covering `addr` on the current CPU (`invlpg`).
///
/// # Safety
/// Privileged. Other CPUs keep their stale entries; cross-CPU shootdown is
/// the caller's problem.
#[cfg(feature = "asm")]
#[inline]
pub unsafe fn invlpg(addr: VirtualAddress) {
    unsafe {
        core::arch::asm!(
            "invlpg [{}]",
            in(reg) addr.as_u64(),
            options(nostack, preserves_flags)
        );
    }
}

/// Full memory barrier (`mfence`): orders all prior loads and stores before
/// all subsequent ones.
#[cfg(feature = "asm")]
#[inline]
pub fn mb() {
    unsafe {
        core::arch::asm!("mfence", options(nostack, preserves_flags));
    }
}

/// Read barrier (`lfence`).
#[cfg(feature = "asm")]
#[inline]
pub fn rmb() {
    unsafe {
        core::arch::asm!("lfence", options(nostack, preserves_flags));
    }
}

/// Write barrier (`sfence`).
#[cfg(feature = "asm")]
#[inline]
pub fn wmb() {
    unsafe {
        core::arch::asm!("sfence", options(nostack, preserves_flags));
    }
}

/// Acquire fence. Compiler-only: x86-64's memory model already gives loads
/// acquire semantics, so no instruction is emitted.
#[inline]
pub fn acquire_fence() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::Acquire);
}

/// Release fence. Compiler-only, as for [`acquire_fence`].
#[inline]
pub fn release_fence() {
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::Release);
}

#[cfg(all(test, feature = "asm"))]
mod tests {
    use super::*;

    #[test]
    fn rdtsc_advances() {
        let a = rdtsc();
        let b = rdtsc();
        assert!(b >= a);
    }

    #[test]
    fn serialize_is_callable() {
        serialize();
        pause();
    }
}
