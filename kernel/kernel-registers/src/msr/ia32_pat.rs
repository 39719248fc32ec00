use bitfield_struct::bitfield;

/// Memory types encodable in a PAT slot (Intel SDM Vol. 3, Table 11-10).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryType {
    /// UC — strongly uncacheable.
    Uncached = 0x00,
    /// WC — write combining.
    WriteCombining = 0x01,
    /// WT — write through.
    WriteThrough = 0x04,
    /// WP — write protected.
    WriteProtected = 0x05,
    /// WB — write back.
    WriteBack = 0x06,
    /// UC- — uncacheable, overridable by a WC MTRR.
    WeaklyUncached = 0x07,
}

impl MemoryType {
    /// Decode a PAT slot value; `None` for the reserved encodings 2 and 3.
    #[must_use]
    pub const fn from_bits(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Self::Uncached),
            0x01 => Some(Self::WriteCombining),
            0x04 => Some(Self::WriteThrough),
            0x05 => Some(Self::WriteProtected),
            0x06 => Some(Self::WriteBack),
            0x07 => Some(Self::WeaklyUncached),
            _ => None,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// `IA32_PAT` — Page Attribute Table (MSR `0x277`).
///
/// Eight 8-bit slots, each selecting one memory type. A page-table entry
/// picks a slot via its PAT/PCD/PWT bits.
///
/// [`Ia32Pat::DEFAULT`] is what init programs on every CPU:
/// slots 0–3 = WB, WC, UC-, UC, mirrored into slots 4–7, so the slot index
/// is independent of the PTE's PAT bit.
#[bitfield(u64)]
pub struct Ia32Pat {
    /// Slot 0 — selected by PAT=0, PCD=0, PWT=0.
    pub pa0: u8,
    /// Slot 1 — selected by PAT=0, PCD=0, PWT=1.
    pub pa1: u8,
    /// Slot 2 — selected by PAT=0, PCD=1, PWT=0.
    pub pa2: u8,
    /// Slot 3 — selected by PAT=0, PCD=1, PWT=1.
    pub pa3: u8,
    /// Slot 4 — mirror of slot 0 with PAT=1.
    pub pa4: u8,
    /// Slot 5 — mirror of slot 1 with PAT=1.
    pub pa5: u8,
    /// Slot 6 — mirror of slot 2 with PAT=1.
    pub pa6: u8,
    /// Slot 7 — mirror of slot 3 with PAT=1.
    pub pa7: u8,
}

impl Ia32Pat {
    /// The value programmed at init: WB, WC, UC-, UC, mirrored.
    pub const DEFAULT: Self = Self::from_bits(0x0007_0106_0007_0106);

    /// Raw value of slot `index` (0..=7).
    #[must_use]
    pub const fn slot(self, index: u8) -> u8 {
        ((self.into_bits() >> (index as u32 * 8)) & 0xFF) as u8
    }

    /// Decoded memory type of slot `index`, if architecturally defined.
    #[must_use]
    pub const fn memory_type(self, index: u8) -> Option<MemoryType> {
        MemoryType::from_bits(self.slot(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slots() {
        let pat = Ia32Pat::DEFAULT;
        assert_eq!(pat.memory_type(0), Some(MemoryType::WriteBack));
        assert_eq!(pat.memory_type(1), Some(MemoryType::WriteCombining));
        assert_eq!(pat.memory_type(2), Some(MemoryType::WeaklyUncached));
        assert_eq!(pat.memory_type(3), Some(MemoryType::Uncached));
    }

    #[test]
    fn default_mirrors_upper_slots() {
        let pat = Ia32Pat::DEFAULT;
        for i in 0..4 {
            assert_eq!(pat.slot(i), pat.slot(i + 4), "slot {i}");
        }
    }

    #[test]
    fn default_raw_value() {
        assert_eq!(Ia32Pat::DEFAULT.into_bits(), 0x0007_0106_0007_0106);
    }

    #[test]
    fn reserved_encodings_decode_to_none() {
        assert_eq!(MemoryType::from_bits(2), None);
        assert_eq!(MemoryType::from_bits(3), None);
        assert_eq!(MemoryType::from_bits(0xFF), None);
    }
}
