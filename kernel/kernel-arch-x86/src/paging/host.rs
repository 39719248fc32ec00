//! Host-MMU (standard x86-64 paging) translation rules.

use kernel_addresses::{PhysicalAddress, VirtualAddress};

use super::{MmuPerms, PageLevel, PageTableModel, PtFlags};

/// The host MMU's page-table flavor.
pub struct HostMmu;

impl PageTableModel for HostMmu {
    type Perms = MmuPerms;
    type Flags = PtFlags;

    fn terminal_flags(_level: PageLevel, perms: MmuPerms) -> PtFlags {
        let mut flags = PtFlags::empty();
        if perms.contains(MmuPerms::PRESENT) {
            flags |= PtFlags::PRESENT;
        }
        if perms.contains(MmuPerms::WRITE) {
            flags |= PtFlags::WRITABLE;
        }
        if perms.contains(MmuPerms::USER) {
            flags |= PtFlags::USER;
        }
        flags
    }

    fn intermediate_flags() -> PtFlags {
        PtFlags::PRESENT | PtFlags::WRITABLE
    }

    fn supports_page_size(level: PageLevel) -> bool {
        matches!(level, PageLevel::Pd | PageLevel::Pdpt)
    }

    fn split_flags(_level: PageLevel, flags: PtFlags) -> PtFlags {
        // The smaller entries keep everything but the size annotation.
        flags.difference(PtFlags::PAGE_SIZE)
    }

    fn perms_of(_level: PageLevel, flags: PtFlags) -> MmuPerms {
        let mut perms = MmuPerms::empty();
        if flags.contains(PtFlags::PRESENT) {
            perms |= MmuPerms::PRESENT;
        }
        if flags.contains(PtFlags::WRITABLE) {
            perms |= MmuPerms::WRITE;
        }
        if flags.contains(PtFlags::USER) {
            perms |= MmuPerms::USER;
        }
        perms
    }

    fn allowed_perms(_perms: MmuPerms) -> bool {
        true
    }

    fn check_vaddr(addr: VirtualAddress) -> bool {
        addr.is_canonical()
    }

    fn check_paddr(addr: PhysicalAddress) -> bool {
        addr.is_valid()
    }
}
