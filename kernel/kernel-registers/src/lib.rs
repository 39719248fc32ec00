//! # Typed x86-64 Registers
//!
//! Architectural models of the control registers and MSRs the MMU and
//! extended-register bring-up code touches, plus the privileged load/store
//! instruction forms behind the [`LoadRegisterUnsafe`] / [`StoreRegisterUnsafe`]
//! seams.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(feature = "cr0")]
pub mod cr0;

#[cfg(feature = "cr3")]
pub mod cr3;

#[cfg(feature = "cr4")]
pub mod cr4;

#[cfg(feature = "xcr0")]
pub mod xcr0;

#[cfg(feature = "msr")]
pub mod msr;

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn store_unsafe(self);
}
