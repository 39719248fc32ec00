//! # User-memory copies
//!
//! Copies that cross the user/kernel boundary can fault on an unmapped or
//! revoked user page. Before touching user memory, the copy routine parks a
//! recovery address in the CPU's fault-recovery slot; the page-fault handler
//! checks [`fault_recovery_slot`] and, when it is armed, redirects execution
//! there instead of treating the fault as fatal.

use core::sync::atomic::{AtomicU64, Ordering};

use kernel_addresses::VirtualAddress;

// One slot per CPU once per-CPU storage is wired through; a single slot is
// correct while copies run with interrupts disabled on one CPU.
static FAULT_RECOVERY: AtomicU64 = AtomicU64::new(0);

/// The armed fault-recovery address, or 0 when no user copy is in flight.
///
/// Consulted by the page-fault handler on faults against user addresses.
#[must_use]
pub fn fault_recovery_slot() -> u64 {
    FAULT_RECOVERY.load(Ordering::Acquire)
}

/// Copy `len` bytes between kernel and user memory, either direction.
///
/// `fault_return` is armed in the fault-recovery slot for the duration of
/// the copy; a user-page fault resumes there and the copy counts as having
/// transferred nothing. On completion the slot is disarmed and the byte
/// count returned.
///
/// # Safety
/// - `dst` and `src` must be valid for `len` bytes and must not overlap.
/// - The user-side pointer must have been range-checked against the user
///   address-space bounds; this routine only protects against faults, not
///   against kernel-memory disclosure.
/// - `fault_return` must point at a landing pad prepared to unwind the
///   caller's state.
#[allow(clippy::cast_possible_wrap)]
pub unsafe fn copy_to_or_from_user(
    dst: *mut u8,
    src: *const u8,
    len: usize,
    fault_return: VirtualAddress,
) -> isize {
    FAULT_RECOVERY.store(fault_return.as_u64(), Ordering::Release);
    unsafe {
        core::ptr::copy_nonoverlapping(src, dst, len);
    }
    FAULT_RECOVERY.store(0, Ordering::Release);
    len as isize
}
