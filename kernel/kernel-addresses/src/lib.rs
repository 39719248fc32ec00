//! # Virtual and Physical Memory Address Types
//!
//! Strongly typed wrappers for the raw addresses handed to the MMU layer.
//!
//! ## Overview
//!
//! Two zero-cost newtypes around `u64` keep virtual and physical addresses
//! from being mixed up at compile time:
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`VirtualAddress`] | A linear address translated through the page tables. |
//! | [`PhysicalAddress`] | A host RAM / MMIO address installed into page-table entries. |
//!
//! Each type carries the architectural validity predicate the MMU layer
//! checks before installing a mapping:
//!
//! - [`VirtualAddress::is_canonical`] — bits \[63:48\] must be a sign
//!   extension of bit 47 (4-level paging).
//! - [`PhysicalAddress::is_valid`] — the architecture caps physical
//!   addresses at 52 bits.
//!
//! ## Typical Usage
//!
//! ```rust
//! # use kernel_addresses::*;
//! let va = VirtualAddress::new(0xFFFF_8000_0000_0000);
//! assert!(va.is_canonical());
//!
//! let pa = PhysicalAddress::new(0x0000_0000_0030_0000);
//! assert!(pa.is_valid());
//! assert!(pa.is_page_aligned());
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

use core::fmt;
use core::ops::{Add, AddAssign};

/// Base paging granule: 4 KiB.
pub const PAGE_SIZE: u64 = 4096;

/// log2 of [`PAGE_SIZE`].
pub const PAGE_SHIFT: u32 = 12;

/// Number of physical address bits the architecture defines (MAXPHYADDR cap).
pub const MAX_PADDR_BITS: u32 = 52;

/// Align `x` down to the nearest multiple of `a`.
///
/// `a` must be a non-zero power of two.
///
/// ```rust
/// # use kernel_addresses::align_down;
/// assert_eq!(align_down(4095, 4096), 0);
/// assert_eq!(align_down(4096, 4096), 4096);
/// ```
#[inline(always)]
#[must_use]
pub const fn align_down(x: u64, a: u64) -> u64 {
    x & !(a - 1)
}

/// Align `x` up to the nearest multiple of `a`.
///
/// `a` must be a non-zero power of two; `x + (a - 1)` must not overflow.
///
/// ```rust
/// # use kernel_addresses::align_up;
/// assert_eq!(align_up(1, 4096), 4096);
/// assert_eq!(align_up(4096, 4096), 4096);
/// ```
#[inline(always)]
#[must_use]
pub const fn align_up(x: u64, a: u64) -> u64 {
    (x + a - 1) & !(a - 1)
}

/// Virtual memory address.
///
/// Construction never validates; call [`is_canonical`](Self::is_canonical)
/// before handing the address to the MMU.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VirtualAddress(u64);

impl VirtualAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as u64)
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether bits \[63:48\] are a sign extension of bit 47.
    ///
    /// Non-canonical addresses fault with #GP when dereferenced; the MMU
    /// layer rejects them up front instead.
    ///
    /// ```rust
    /// # use kernel_addresses::VirtualAddress;
    /// assert!(VirtualAddress::new(0x0000_7FFF_FFFF_FFFF).is_canonical());
    /// assert!(!VirtualAddress::new(0x0000_8000_0000_0000).is_canonical());
    /// assert!(VirtualAddress::new(0xFFFF_8000_0000_0000).is_canonical());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_canonical(self) -> bool {
        let high_bits = self.0 >> 48;
        high_bits == 0 || high_bits == 0xFFFF
    }

    /// Whether the low [`PAGE_SHIFT`] bits are zero.
    #[inline]
    #[must_use]
    pub const fn is_page_aligned(self) -> bool {
        self.0 & (PAGE_SIZE - 1) == 0
    }

    /// Base of the 4 KiB page containing this address.
    #[inline]
    #[must_use]
    pub const fn page_base(self) -> Self {
        Self(align_down(self.0, PAGE_SIZE))
    }
}

impl fmt::Debug for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA(0x{:016X})", self.0)
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl From<u64> for VirtualAddress {
    #[inline]
    fn from(v: u64) -> Self {
        Self::new(v)
    }
}

impl Add<u64> for VirtualAddress {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<u64> for VirtualAddress {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

/// Physical memory address.
///
/// Construction never validates; call [`is_valid`](Self::is_valid) before
/// installing the address into a page-table entry.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PhysicalAddress(u64);

impl PhysicalAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether the address fits the architectural 52-bit physical width.
    ///
    /// A refinement via CPUID leaf `0x8000_0008` would narrow this to the
    /// width the running CPU actually implements; the flat bound is what
    /// the translator tables require.
    ///
    /// ```rust
    /// # use kernel_addresses::PhysicalAddress;
    /// assert!(PhysicalAddress::new((1 << 52) - 1).is_valid());
    /// assert!(!PhysicalAddress::new(1 << 52).is_valid());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 < (1 << MAX_PADDR_BITS)
    }

    /// Whether the low [`PAGE_SHIFT`] bits are zero.
    #[inline]
    #[must_use]
    pub const fn is_page_aligned(self) -> bool {
        self.0 & (PAGE_SIZE - 1) == 0
    }

    /// Base of the 4 KiB frame containing this address.
    #[inline]
    #[must_use]
    pub const fn page_base(self) -> Self {
        Self(align_down(self.0, PAGE_SIZE))
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PA(0x{:016X})", self.0)
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

impl From<u64> for PhysicalAddress {
    #[inline]
    fn from(v: u64) -> Self {
        Self::new(v)
    }
}

impl Add<u64> for PhysicalAddress {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<u64> for PhysicalAddress {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_boundaries() {
        // Highest low-half address and lowest high-half address.
        assert!(VirtualAddress::new(0x0000_7FFF_FFFF_FFFF).is_canonical());
        assert!(VirtualAddress::new(0xFFFF_8000_0000_0000).is_canonical());

        // First address past the low half is a hole.
        assert!(!VirtualAddress::new(0x0000_8000_0000_0000).is_canonical());
        assert!(!VirtualAddress::new(0x0001_0000_0000_0000).is_canonical());
    }

    #[test]
    fn canonical_iff_high_bits_uniform() {
        for v in [0u64, 1, 0xFFFF_FFFF_FFFF_FFFF, 0x1234_5678_9ABC_DEF0] {
            let expect = matches!(v >> 48, 0 | 0xFFFF);
            assert_eq!(VirtualAddress::new(v).is_canonical(), expect, "{v:#x}");
        }
    }

    #[test]
    fn paddr_bound_is_52_bits() {
        assert!(PhysicalAddress::new(0).is_valid());
        assert!(PhysicalAddress::new((1 << 52) - 1).is_valid());
        assert!(!PhysicalAddress::new(1 << 52).is_valid());
        assert!(!PhysicalAddress::new(u64::MAX).is_valid());
    }

    #[test]
    fn page_alignment() {
        assert!(VirtualAddress::new(0x2000).is_page_aligned());
        assert!(!VirtualAddress::new(0x2001).is_page_aligned());
        assert_eq!(
            VirtualAddress::new(0x2FFF).page_base(),
            VirtualAddress::new(0x2000)
        );
        assert_eq!(
            PhysicalAddress::new(0x12345).page_base(),
            PhysicalAddress::new(0x12000)
        );
    }

    #[test]
    fn align_helpers() {
        assert_eq!(align_down(0x12345, 16), 0x12340);
        assert_eq!(align_up(0x12345, 16), 0x12350);
        assert_eq!(align_up(0, 4096), 0);
    }
}
