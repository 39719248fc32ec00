//! EPT (Intel nested paging) translation rules.
//!
//! EPT entries have no present bit; an entry with R, W and X all clear is
//! not present. Terminal entries here are always encoded readable and
//! writable, with execute added on request.

use kernel_addresses::{PhysicalAddress, VirtualAddress};

use super::{EptFlags, EptPerms, PageLevel, PageTableModel};

/// The EPT page-table flavor, used for virtualization guests.
pub struct Ept;

impl PageTableModel for Ept {
    type Perms = EptPerms;
    type Flags = EptFlags;

    fn terminal_flags(_level: PageLevel, perms: EptPerms) -> EptFlags {
        let mut flags = EptFlags::READ | EptFlags::WRITE;
        if perms.contains(EptPerms::EXECUTE) {
            flags |= EptFlags::EXECUTE;
        }
        flags
    }

    fn intermediate_flags() -> EptFlags {
        EptFlags::READ | EptFlags::WRITE | EptFlags::EXECUTE
    }

    fn supports_page_size(level: PageLevel) -> bool {
        super::HostMmu::supports_page_size(level)
    }

    fn split_flags(_level: PageLevel, flags: EptFlags) -> EptFlags {
        // EPT large-entry flags carry over to the smaller entries unchanged.
        flags
    }

    fn perms_of(_level: PageLevel, flags: EptFlags) -> EptPerms {
        let mut perms = EptPerms::empty();
        if flags.contains(EptFlags::READ) {
            perms |= EptPerms::READ;
        }
        if flags.contains(EptFlags::WRITE) {
            perms |= EptPerms::WRITE;
        }
        if flags.contains(EptFlags::EXECUTE) {
            perms |= EptPerms::EXECUTE;
        }
        perms
    }

    fn allowed_perms(_perms: EptPerms) -> bool {
        true
    }

    fn check_vaddr(addr: VirtualAddress) -> bool {
        addr.is_canonical()
    }

    fn check_paddr(addr: PhysicalAddress) -> bool {
        addr.is_valid()
    }
}
