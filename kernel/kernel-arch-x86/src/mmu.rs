//! # Memory-attribute initialization (PAT, CR0.WP, MTRR)
//!
//! Boot order: [`early_init`] on the BSP, [`percpu_init`] on every CPU
//! (including the BSP), [`mem_type_init`] once the VM subsystem is up.
//! All CPUs must end up with identical PAT contents; [`pat_sync`] is the
//! cross-CPU agreement point.

#[cfg(feature = "asm")]
use kernel_registers::{
    LoadRegisterUnsafe, StoreRegisterUnsafe,
    cr0::Cr0,
    msr::{Ia32MtrrCap, Ia32MtrrDefType, Ia32Pat, Msr},
};

/// A bit set of target CPUs for cross-CPU operations; bit n is CPU n.
pub type CpuMask = u64;

/// BSP-only early bring-up: program the PAT with its boot value and turn on
/// CR0.WP so supervisor writes honor read-only kernel mappings.
///
/// # Safety
/// Privileged. Run with interrupts disabled; the CR0 update is a
/// read-modify-write.
#[cfg(feature = "asm")]
pub unsafe fn early_init() {
    unsafe {
        Msr::IA32_PAT.store_raw(Ia32Pat::DEFAULT.into_bits());
        let cr0 = Cr0::load_unsafe().with_wp_write_protect(true);
        cr0.store_unsafe();
    }
    log::debug!("mmu: PAT programmed, CR0.WP enabled");
}

/// Per-CPU bring-up: program this CPU's PAT to the shared boot value and
/// take stock of the MTRRs.
///
/// Variable MTRRs are left exactly as the firmware configured them; only
/// their presence is recorded. TODO: program variable MTRRs once the
/// physical-memory map is plumbed through to this layer.
///
/// # Safety
/// Privileged. Must run on every CPU before it touches cacheable kernel
/// mappings.
#[cfg(feature = "asm")]
pub unsafe fn percpu_init() {
    let cap = unsafe {
        Msr::IA32_PAT.store_raw(Ia32Pat::DEFAULT.into_bits());
        Ia32MtrrCap::from_bits(Msr::IA32_MTRRCAP.load_raw())
    };
    if cap.wc_supported() {
        log::debug!(
            "mmu: MTRRs present (vcnt={}), keeping firmware defaults",
            cap.vcnt()
        );
    }
}

/// Late memory-type setup: if the firmware left MTRRs enabled, force the
/// default memory type to write-back so uncovered ranges are cacheable.
/// Disabled MTRRs are left alone.
///
/// # Safety
/// Privileged. Caches need not be flushed: the default type only loosens
/// from UC to WB here.
#[cfg(feature = "asm")]
pub unsafe fn mem_type_init() {
    unsafe {
        let def = Ia32MtrrDefType::from_bits(Msr::IA32_MTRR_DEF_TYPE.load_raw());
        if def.enable() {
            let fixed = def.defaulted_to_write_back();
            Msr::IA32_MTRR_DEF_TYPE.store_raw(fixed.into_bits());
            if fixed.mem_type() != def.mem_type() {
                log::debug!(
                    "mmu: MTRR default type {} -> write-back",
                    def.mem_type()
                );
            }
        }
    }
}

/// Propagate the local PAT value to the CPUs in `targets`.
///
/// A single-CPU mask needs no synchronization and returns immediately. The
/// multi-CPU path requires the IPI machinery in [`crate::mp`]; until an
/// implementation lands there, all CPUs get identical PAT contents from
/// [`percpu_init`] and this logs the unserviced request.
pub fn pat_sync(targets: CpuMask) {
    if targets.count_ones() <= 1 {
        return;
    }
    log::warn!("mmu: pat_sync for multiple CPUs not wired up (targets={targets:#x})");
}
