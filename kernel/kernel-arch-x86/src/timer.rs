//! # Time-source frequency discovery
//!
//! CPUID leaf 15H reports the TSC/crystal ratio and the crystal frequency on
//! CPUs that know them. Where the leaf is absent or partial, the lookups
//! fall back to last-resort defaults; a platform timer calibration pass can
//! refine them later.

#[cfg(feature = "asm")]
use crate::cpuid::cpuid;

/// Last-resort TSC frequency when CPUID does not report one: 2.4 GHz.
pub const TSC_FREQ_FALLBACK_HZ: u64 = 2_400_000_000;

/// Last-resort core-crystal frequency: 24 MHz.
pub const CORE_CRYSTAL_FREQ_FALLBACK_HZ: u64 = 24_000_000;

/// TSC frequency in Hz.
#[cfg(feature = "asm")]
#[must_use]
pub fn lookup_tsc_freq() -> u64 {
    let Some(leaf) = cpuid(0x15, 0) else {
        return TSC_FREQ_FALLBACK_HZ;
    };
    tsc_hz_from_leaf_15h(leaf.eax, leaf.ebx, u64::from(leaf.ecx)).unwrap_or(TSC_FREQ_FALLBACK_HZ)
}

/// Core-crystal frequency in Hz.
#[cfg(feature = "asm")]
#[must_use]
pub fn lookup_core_crystal_freq() -> u64 {
    match cpuid(0x15, 0) {
        Some(leaf) if leaf.ecx != 0 => u64::from(leaf.ecx),
        _ => CORE_CRYSTAL_FREQ_FALLBACK_HZ,
    }
}

/// TSC frequency from the leaf-15H triple: `crystal_hz * numerator /
/// denominator`, or `None` when any of the three is unreported (zero).
#[must_use]
pub const fn tsc_hz_from_leaf_15h(
    denominator: u32,
    numerator: u32,
    crystal_hz: u64,
) -> Option<u64> {
    if denominator == 0 || numerator == 0 || crystal_hz == 0 {
        return None;
    }
    Some(crystal_hz * numerator as u64 / denominator as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_triple_scales_the_crystal() {
        // 24 MHz crystal at a 88/2 ratio: 1.056 GHz.
        assert_eq!(
            tsc_hz_from_leaf_15h(2, 88, 24_000_000),
            Some(1_056_000_000)
        );
    }

    #[test]
    fn unit_ratio_passes_the_crystal_through() {
        assert_eq!(tsc_hz_from_leaf_15h(1, 1, 24_000_000), Some(24_000_000));
    }

    #[test]
    fn partial_reports_yield_none() {
        assert_eq!(tsc_hz_from_leaf_15h(0, 88, 24_000_000), None);
        assert_eq!(tsc_hz_from_leaf_15h(2, 0, 24_000_000), None);
        assert_eq!(tsc_hz_from_leaf_15h(2, 88, 0), None);
    }

    #[cfg(feature = "asm")]
    #[test]
    fn lookups_always_return_a_nonzero_frequency() {
        assert_ne!(lookup_tsc_freq(), 0);
        assert_ne!(lookup_core_crystal_freq(), 0);
    }
}
