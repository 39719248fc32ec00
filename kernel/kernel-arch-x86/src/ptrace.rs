//! # Intel Processor Trace hook
//!
//! Seam for the tracing subsystem. PT programs its buffers and filters
//! through MSRs of its own; none of that machinery exists yet, but the boot
//! sequence already calls the entry point so its position in the bring-up
//! order is fixed.

/// Initialize Intel Processor Trace on the current CPU.
///
/// Nothing is enabled today; tracing stays off until the subsystem that
/// consumes the trace buffers lands.
pub fn processor_trace_init() {
    log::trace!("ptrace: processor trace not enabled");
}

#[cfg(test)]
mod tests {
    use super::processor_trace_init;

    #[test]
    fn init_is_a_callable_no_op() {
        processor_trace_init();
    }
}
