use bitfield_struct::bitfield;

/// `IA32_MTRRCAP` — MTRR capability report (MSR `0xFE`, read-only).
///
/// Init only consults [`wc_supported`](Self::wc_supported) before allowing
/// write-combining mappings; the range counts are modeled for diagnostics.
#[bitfield(u64)]
pub struct Ia32MtrrCap {
    /// Bits 0–7 — VCNT: number of variable-range MTRR pairs.
    pub vcnt: u8,

    /// Bit 8 — FIX: fixed-range MTRRs supported.
    pub fixed_range_supported: bool,

    /// Bit 9 — Reserved.
    #[bits(access = RO)]
    pub reserved0: bool,

    /// Bit 10 — WC: the write-combining memory type is supported.
    pub wc_supported: bool,

    /// Bit 11 — SMRR: system-management range register supported.
    pub smrr_supported: bool,

    /// Bits 12–63 — Reserved.
    #[bits(52, access = RO)]
    pub reserved1: u64,
}

/// `IA32_MTRR_DEF_TYPE` — MTRR default memory type and enables (MSR `0x2FF`).
#[bitfield(u64)]
pub struct Ia32MtrrDefType {
    /// Bits 0–7 — default memory type for ranges no MTRR covers.
    pub mem_type: u8,

    /// Bits 8–9 — Reserved.
    #[bits(2, access = RO)]
    pub reserved0: u8,

    /// Bit 10 — FE: fixed-range MTRRs enabled.
    pub fixed_enable: bool,

    /// Bit 11 — E: MTRRs enabled. When clear, everything is uncached.
    pub enable: bool,

    /// Bits 12–63 — Reserved.
    #[bits(52, access = RO)]
    pub reserved1: u64,
}

impl Ia32MtrrDefType {
    /// The write-back memory type encoding.
    pub const MEM_TYPE_WRITE_BACK: u8 = 0x06;

    /// The value init programs when the firmware left MTRRs enabled:
    /// the same enables with the default type forced to write-back.
    ///
    /// When MTRRs are disabled the register is left alone; forcing a type
    /// there would have no effect anyway.
    #[must_use]
    pub const fn defaulted_to_write_back(self) -> Self {
        if self.enable() {
            self.with_mem_type(Self::MEM_TYPE_WRITE_BACK)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wc_supported_is_bit_10() {
        assert!(Ia32MtrrCap::from_bits(0x400).wc_supported());
        assert!(!Ia32MtrrCap::from_bits(0x508 & !0x400).wc_supported());
    }

    #[test]
    fn enable_is_bit_11() {
        assert!(Ia32MtrrDefType::from_bits(0x800).enable());
        assert!(!Ia32MtrrDefType::from_bits(0x400).enable());
    }

    #[test]
    fn enabled_register_gets_write_back_default() {
        let def = Ia32MtrrDefType::from_bits(0xC00); // FE | E, type UC
        let fixed = def.defaulted_to_write_back();
        assert_eq!(fixed.mem_type(), 0x06);
        assert!(fixed.enable());
        assert!(fixed.fixed_enable());
    }

    #[test]
    fn disabled_register_is_untouched() {
        let def = Ia32MtrrDefType::from_bits(0x00);
        assert_eq!(def.defaulted_to_write_back().into_bits(), 0x00);
    }
}
