//! # Page-table flag translation
//!
//! Higher-level VM code speaks a portable three-bit permission vocabulary;
//! the hardware speaks architectural entry encodings, and two different ones
//! at that (host MMU and EPT). This module owns the translation.
//!
//! The portable vocabulary is deliberately split into two disjoint types.
//! Bit `0x4` means "user accessible" to the host MMU and "executable" to
//! EPT; a shared flag type would let callers hand one translator the other's
//! permissions without complaint. [`MmuPerms`] and [`EptPerms`] carry the
//! same raw bit positions (the stable ABI with the VM layer) but do not
//! interconvert.

use bitflags::bitflags;
use kernel_addresses::{PhysicalAddress, VirtualAddress};

pub mod ept;
pub mod host;

pub use ept::Ept;
pub use host::HostMmu;

/// A level of the page-table hierarchy, leaf-most first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum PageLevel {
    /// Page table; terminal entries map 4 KiB.
    Pt = 0,
    /// Page directory; large terminal entries map 2 MiB.
    Pd = 1,
    /// Page-directory-pointer table; large terminal entries map 1 GiB.
    Pdpt = 2,
    /// Page-map level 4.
    Pml4 = 3,
    /// Page-map level 5 (LA57).
    Pml5 = 4,
}

impl PageLevel {
    /// All levels, leaf-most first.
    pub const ALL: [Self; 5] = [Self::Pt, Self::Pd, Self::Pdpt, Self::Pml4, Self::Pml5];

    /// Level from its numeric index (0 = leaf-most).
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Pt),
            1 => Some(Self::Pd),
            2 => Some(Self::Pdpt),
            3 => Some(Self::Pml4),
            4 => Some(Self::Pml5),
            _ => None,
        }
    }

    /// Numeric index of this level.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Bytes mapped by a terminal entry at this level, if terminal entries
    /// exist here.
    #[must_use]
    pub const fn page_size(self) -> Option<u64> {
        match self {
            Self::Pt => Some(1 << 12),
            Self::Pd => Some(1 << 21),
            Self::Pdpt => Some(1 << 30),
            Self::Pml4 | Self::Pml5 => None,
        }
    }
}

bitflags! {
    /// Portable permissions for host-MMU mappings.
    ///
    /// The raw bits are the stable ABI with the VM layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MmuPerms: u64 {
        const PRESENT = 0x1;
        const WRITE = 0x2;
        const USER = 0x4;
    }

    /// Portable permissions for EPT (guest-physical) mappings.
    ///
    /// Same bit positions as [`MmuPerms`], different meaning for `0x4`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EptPerms: u64 {
        const READ = 0x1;
        const WRITE = 0x2;
        const EXECUTE = 0x4;
    }

    /// Architectural x86-64 page-table entry flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PtFlags: u64 {
        const PRESENT = 0x001;
        const WRITABLE = 0x002;
        const USER = 0x004;
        const WRITE_THROUGH = 0x008;
        const CACHE_DISABLE = 0x010;
        const ACCESSED = 0x020;
        const DIRTY = 0x040;
        /// Terminal large page at PD/PDPT level.
        const PAGE_SIZE = 0x080;
        /// Survives non-global TLB flushes while CR4.PGE is set.
        const GLOBAL = 0x100;
        const NO_EXECUTE = 1 << 63;
    }

    /// Architectural EPT entry flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EptFlags: u64 {
        const READ = 0x1;
        const WRITE = 0x2;
        const EXECUTE = 0x4;
        const ACCESSED = 1 << 8;
        const DIRTY = 1 << 9;
    }
}

/// Mask of the physical frame number within an entry, bits [51:12].
pub const FRAME_MASK: u64 = 0x000F_FFFF_FFFF_F000;

/// One page-table flavor's translation rules.
///
/// Implementations are stateless; everything is a pure function of the
/// inputs. [`HostMmu`] and [`Ept`] are the two flavors.
pub trait PageTableModel {
    /// The portable permission vocabulary for this flavor.
    type Perms: Copy;
    /// The architectural entry-flag encoding for this flavor.
    type Flags: Copy;

    /// Architectural flags for a terminal (frame-mapping) entry.
    fn terminal_flags(level: PageLevel, perms: Self::Perms) -> Self::Flags;

    /// Architectural flags for an intermediate (table-pointing) entry.
    ///
    /// Intermediate entries are maximally permissive; per-mapping privilege
    /// is enforced at the terminal level.
    fn intermediate_flags() -> Self::Flags;

    /// Whether terminal large-page entries exist at `level`.
    fn supports_page_size(level: PageLevel) -> bool;

    /// Flags for the smaller entries produced by splitting a large terminal
    /// entry at `level`, given the large entry's flags.
    fn split_flags(level: PageLevel, flags: Self::Flags) -> Self::Flags;

    /// Recover the portable permissions encoded in `flags`.
    fn perms_of(level: PageLevel, flags: Self::Flags) -> Self::Perms;

    /// Whether `perms` can be represented in this flavor at all.
    fn allowed_perms(perms: Self::Perms) -> bool;

    /// Whether `addr` may be used as a mapping target address.
    fn check_vaddr(addr: VirtualAddress) -> bool;

    /// Whether `addr` may be used as a mapped frame address.
    fn check_paddr(addr: PhysicalAddress) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_round_trip_their_index() {
        for level in PageLevel::ALL {
            assert_eq!(PageLevel::from_index(level.index()), Some(level));
        }
        assert_eq!(PageLevel::from_index(5), None);
    }

    #[test]
    fn page_sizes() {
        assert_eq!(PageLevel::Pt.page_size(), Some(4 * 1024));
        assert_eq!(PageLevel::Pd.page_size(), Some(2 * 1024 * 1024));
        assert_eq!(PageLevel::Pdpt.page_size(), Some(1024 * 1024 * 1024));
        assert_eq!(PageLevel::Pml4.page_size(), None);
        assert_eq!(PageLevel::Pml5.page_size(), None);
    }

    #[test]
    fn portable_bits_are_the_documented_abi() {
        assert_eq!(MmuPerms::PRESENT.bits(), 0x1);
        assert_eq!(MmuPerms::WRITE.bits(), 0x2);
        assert_eq!(MmuPerms::USER.bits(), 0x4);
        assert_eq!(EptPerms::READ.bits(), 0x1);
        assert_eq!(EptPerms::WRITE.bits(), 0x2);
        assert_eq!(EptPerms::EXECUTE.bits(), 0x4);
    }

    #[test]
    fn frame_mask_covers_bits_12_to_51() {
        assert_eq!(FRAME_MASK, ((1 << 52) - 1) & !0xFFF);
    }
}
