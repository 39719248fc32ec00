//! Cross-model checks of the page-table flag translators: the properties
//! the VM layer relies on regardless of which flavor it is driving.

use kernel_addresses::{PhysicalAddress, VirtualAddress};
use kernel_arch_x86::paging::{
    Ept, EptPerms, FRAME_MASK, HostMmu, MmuPerms, PageLevel, PageTableModel,
};

fn for_each_level(mut f: impl FnMut(PageLevel)) {
    for level in PageLevel::ALL {
        f(level);
    }
}

#[test]
fn terminal_entries_never_carry_the_size_bit() {
    // Large-entry annotation is applied by the walker at mapping time, and
    // only where the level supports it; the translators never emit it.
    for_each_level(|level| {
        for bits in 0..=0x7u64 {
            let host = HostMmu::terminal_flags(level, MmuPerms::from_bits_truncate(bits));
            assert_eq!(host.bits() & 0x80, 0, "host level {level:?} perms {bits:#x}");
        }
    });
}

#[test]
fn split_undoes_the_size_annotation() {
    use kernel_arch_x86::paging::PtFlags;
    for_each_level(|level| {
        for bits in 0..=0x7u64 {
            let terminal = HostMmu::terminal_flags(level, MmuPerms::from_bits_truncate(bits));
            let large = terminal | PtFlags::PAGE_SIZE;
            assert_eq!(HostMmu::split_flags(level, large), terminal);
        }
    });
}

#[test]
fn host_decode_inverts_host_terminal() {
    for_each_level(|level| {
        for bits in 0..=0x7u64 {
            let perms = MmuPerms::from_bits_truncate(bits);
            let flags = HostMmu::terminal_flags(level, perms);
            assert_eq!(HostMmu::perms_of(level, flags), perms);
        }
    });
}

#[test]
fn ept_decode_inverts_ept_terminal_modulo_the_rw_base() {
    for_each_level(|level| {
        for bits in 0..=0x7u64 {
            let perms = EptPerms::from_bits_truncate(bits);
            let flags = Ept::terminal_flags(level, perms);
            let decoded = Ept::perms_of(level, flags);
            assert_eq!(decoded, perms | EptPerms::READ | EptPerms::WRITE);
        }
    });
}

#[test]
fn both_models_support_large_pages_at_the_same_levels() {
    for_each_level(|level| {
        assert_eq!(
            HostMmu::supports_page_size(level),
            Ept::supports_page_size(level)
        );
        assert_eq!(
            HostMmu::supports_page_size(level),
            matches!(level, PageLevel::Pd | PageLevel::Pdpt)
        );
    });
}

#[test]
fn address_checks_agree_between_models() {
    let vaddrs = [
        (0x0000_0000_0000_0000u64, true),
        (0x0000_7FFF_FFFF_FFFF, true),
        (0x0000_8000_0000_0000, false),
        (0xFFFF_8000_0000_0000, true),
        (0xFFFF_FFFF_FFFF_FFFF, true),
        (0x0001_0000_0000_0000, false),
    ];
    for (raw, ok) in vaddrs {
        let va = VirtualAddress::new(raw);
        assert_eq!(HostMmu::check_vaddr(va), ok, "{raw:#x}");
        assert_eq!(Ept::check_vaddr(va), ok, "{raw:#x}");
    }

    let paddrs = [
        (0u64, true),
        ((1 << 52) - 1, true),
        (1 << 52, false),
        (u64::MAX, false),
    ];
    for (raw, ok) in paddrs {
        let pa = PhysicalAddress::new(raw);
        assert_eq!(HostMmu::check_paddr(pa), ok, "{raw:#x}");
        assert_eq!(Ept::check_paddr(pa), ok, "{raw:#x}");
    }
}

#[test]
fn frame_mask_never_overlaps_translated_flags() {
    for_each_level(|level| {
        let host = HostMmu::terminal_flags(level, MmuPerms::all());
        assert_eq!(host.bits() & FRAME_MASK, 0);
        let ept = Ept::terminal_flags(level, EptPerms::all());
        assert_eq!(ept.bits() & FRAME_MASK, 0);
    });
    assert_eq!(HostMmu::intermediate_flags().bits() & FRAME_MASK, 0);
    assert_eq!(Ept::intermediate_flags().bits() & FRAME_MASK, 0);
}
