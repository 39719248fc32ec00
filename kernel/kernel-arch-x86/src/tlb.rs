//! # TLB management
//!
//! All three operations act on the current CPU only; cross-CPU shootdown is
//! an IPI concern that lives above this layer.

#[cfg(feature = "asm")]
use kernel_addresses::VirtualAddress;
#[cfg(feature = "asm")]
use kernel_registers::{LoadRegisterUnsafe, StoreRegisterUnsafe, cr3::Cr3, cr4::Cr4};

/// Flush every non-global TLB entry by reloading CR3 with its current value.
///
/// Entries with the G bit set survive. Use [`flush_all`] when global kernel
/// mappings changed.
///
/// # Safety
/// Privileged. The active page tables must remain valid across the reload.
#[cfg(feature = "asm")]
pub unsafe fn flush_nonglobal() {
    unsafe {
        Cr3::load_unsafe().store_unsafe();
    }
}

/// Flush the entire TLB, global entries included.
///
/// Toggling CR4.PGE off and back on discards G-bit entries; when PGE is not
/// enabled there are no global entries and a CR3 reload suffices.
///
/// # Safety
/// Privileged, and not preemption-safe around the CR4 writes; run with
/// interrupts disabled.
#[cfg(feature = "asm")]
pub unsafe fn flush_all() {
    unsafe {
        let cr4 = Cr4::load_unsafe();
        if cr4.pge() {
            cr4.with_pge(false).store_unsafe();
            cr4.store_unsafe();
        } else {
            flush_nonglobal();
        }
    }
}

/// Flush the TLB entry covering one page (`invlpg`).
///
/// # Safety
/// Privileged.
#[cfg(feature = "asm")]
pub unsafe fn flush_page(addr: VirtualAddress) {
    unsafe {
        crate::asm::invlpg(addr);
    }
}
