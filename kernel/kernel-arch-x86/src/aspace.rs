//! # Address-space operations seam
//!
//! The VM subsystem owns address spaces, region bookkeeping and page-table
//! walking; this layer only defines the contract it implements per
//! architecture. Flag translation for the entries it writes comes from
//! [`crate::paging`].

use kernel_addresses::{PhysicalAddress, VirtualAddress};

use crate::paging::MmuPerms;
use crate::status::ArchResult;

/// An existing translation, as reported by [`AddressSpaceOps::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub paddr: PhysicalAddress,
    pub perms: MmuPerms,
}

/// Architecture-side operations on one address space.
///
/// All virtual addresses must be canonical and page-aligned, all physical
/// addresses valid and page-aligned; implementations reject violations with
/// [`crate::ArchError::InvalidArgs`]. Counts are in pages.
pub trait AddressSpaceOps {
    /// Map `frames` at consecutive pages starting at `vaddr`. Returns the
    /// number of pages mapped.
    fn map(
        &mut self,
        vaddr: VirtualAddress,
        frames: &[PhysicalAddress],
        perms: MmuPerms,
    ) -> ArchResult<usize>;

    /// Map `count` pages of physically contiguous memory starting at
    /// `paddr` to `vaddr`. Returns the number of pages mapped.
    fn map_contiguous(
        &mut self,
        vaddr: VirtualAddress,
        paddr: PhysicalAddress,
        count: usize,
        perms: MmuPerms,
    ) -> ArchResult<usize>;

    /// Unmap `count` pages starting at `vaddr`. Returns the number of pages
    /// that were mapped.
    fn unmap(&mut self, vaddr: VirtualAddress, count: usize) -> ArchResult<usize>;

    /// Change the permissions of `count` mapped pages starting at `vaddr`.
    fn protect(
        &mut self,
        vaddr: VirtualAddress,
        count: usize,
        perms: MmuPerms,
    ) -> ArchResult<()>;

    /// Look up the translation of `vaddr`.
    fn query(&self, vaddr: VirtualAddress) -> ArchResult<Mapping>;

    /// Find a free `size`-byte region at or above `base`, preferring
    /// alignments that allow large pages.
    fn pick_spot(&self, base: VirtualAddress, size: u64) -> ArchResult<VirtualAddress>;

    /// Make this address space current on the calling CPU. `from` is the
    /// previously current space, if any.
    fn context_switch(from: Option<&Self>, to: &Self);
}
