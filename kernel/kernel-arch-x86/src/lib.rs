//! # x86-64 architecture support
//!
//! The boundary between portable kernel code and the raw CPU:
//!
//! - [`asm`] — single-instruction wrappers (interrupt gating, halt, fences,
//!   TSC reads, page invalidation).
//! - [`cpuid`] — feature probing; leaf 0 is reserved for [`asm::serialize`].
//! - [`xstate`] — FXSAVE/XSAVE bring-up and save-area sizing.
//! - [`mmu`] — PAT and MTRR memory-attribute initialization.
//! - [`tlb`] — TLB invalidation, per page and whole.
//! - [`paging`] — translation between portable page permissions and the
//!   architectural host-MMU and EPT entry encodings.
//! - [`timer`] — TSC and core-crystal frequency discovery.
//! - [`status`] — the shared error codes of this layer.
//!
//! The remaining modules ([`mp`], [`tss`], [`bootstrap16`], [`user_copy`],
//! [`ptrace`], [`aspace`]) are the collaborator surface: seams the wider
//! kernel fills in.
//!
//! Everything here runs synchronously on the calling CPU. Control-register
//! read-modify-write sequences are not preemption-safe; callers disable
//! interrupts around them.
#![cfg_attr(not(any(test, doctest)), no_std)]

pub mod asm;
pub mod aspace;
pub mod bootstrap16;
pub mod cpuid;
pub mod mmu;
pub mod mp;
pub mod paging;
pub mod ptrace;
pub mod status;
pub mod timer;
pub mod tlb;
pub mod tss;
pub mod user_copy;
pub mod xstate;

pub use status::{ArchError, ArchResult};
