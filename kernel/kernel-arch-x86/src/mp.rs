//! # Multi-processor bring-up surface
//!
//! Seams the platform/MP subsystem fills in as SMP support lands. Only the
//! halt-IPI handler has real behavior today; the rest documents the
//! contracts the rest of the kernel codes against.

use crate::status::ArchResult;

/// Position of a CPU in the package/core/thread hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTopology {
    pub package: u32,
    pub core: u32,
    pub smt: u32,
}

/// Allocate per-CPU structures for the application processors named by
/// `apic_ids`, ahead of waking them.
///
/// Nothing is allocated yet; AP bring-up is not wired through this layer.
pub fn allocate_ap_structures(apic_ids: &[u32]) -> ArchResult<()> {
    log::debug!("mp: {} application processors reported", apic_ids.len());
    Ok(())
}

/// Map a local APIC ID to a kernel CPU number.
///
/// Identity mapping. Valid while CPU numbers are assigned in APIC-ID order
/// from a single cluster; revisit for x2APIC multi-cluster topologies.
#[must_use]
pub const fn apic_id_to_cpu_num(apic_id: u32) -> u32 {
    apic_id
}

/// Additional per-CPU setup for `cpu_num` beyond what the boot assembly
/// already established. Nothing further is needed today.
pub fn init_percpu(cpu_num: u32) {
    log::trace!("mp: per-cpu init for cpu {cpu_num}");
}

/// Decode the topology position of the CPU with the given APIC ID.
///
/// Flat stand-in: every CPU its own package. The leaf-1FH/0BH walk replaces
/// this together with the APIC-ID mapping above.
pub fn decode_topology(apic_id: u32) -> ArchResult<CpuTopology> {
    Ok(CpuTopology {
        package: apic_id,
        core: 0,
        smt: 0,
    })
}

/// Handler for the halt IPI: disable interrupts and halt forever.
#[cfg(feature = "asm")]
pub fn ipi_halt_handler() -> ! {
    unsafe {
        crate::asm::disable_interrupts();
    }
    loop {
        unsafe {
            crate::asm::halt();
        }
    }
}

/// Send halt IPIs to every CPU except the current one and the BSP.
///
/// Used on panic to quiesce the machine. Requires the local-APIC driver;
/// until it lands, single-CPU configurations have nobody to halt.
pub fn force_halt_all_but_local_and_bsp() {
    log::warn!("mp: halt broadcast requested without an APIC driver");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apic_id_mapping_is_identity() {
        assert_eq!(apic_id_to_cpu_num(0), 0);
        assert_eq!(apic_id_to_cpu_num(7), 7);
    }

    #[test]
    fn topology_is_flat() {
        let topo = decode_topology(3).unwrap();
        assert_eq!(topo, CpuTopology { package: 3, core: 0, smt: 0 });
    }

    #[test]
    fn ap_allocation_succeeds() {
        assert!(allocate_ap_structures(&[1, 2, 3]).is_ok());
        assert!(allocate_ap_structures(&[]).is_ok());
    }
}
