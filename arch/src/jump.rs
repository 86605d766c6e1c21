use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Jump field of a compute instruction. "No jump" (`000`) is `None` at the
/// use sites, so every variant here actually branches on some condition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Jump {
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

impl Jump {
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<Self>().ok()
    }

    pub fn bits(jump: Option<Jump>) -> u8 {
        jump.map_or(0, u8::from)
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::try_from(bits & 0b111).ok()
    }

    /// Whether the jump is taken for the given ALU output.
    pub fn test(self, out: u16) -> bool {
        let bits = u8::from(self);
        let out = out as i16;
        (bits & 0b100 != 0 && out < 0) || (bits & 0b010 != 0 && out == 0) || (bits & 0b001 != 0 && out > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn conditions() {
        let neg = (-3i16) as u16;
        assert!(Jump::JGT.test(1) && !Jump::JGT.test(0) && !Jump::JGT.test(neg));
        assert!(Jump::JEQ.test(0) && !Jump::JEQ.test(1));
        assert!(Jump::JGE.test(0) && Jump::JGE.test(5) && !Jump::JGE.test(neg));
        assert!(Jump::JLT.test(neg) && !Jump::JLT.test(0));
        assert!(Jump::JNE.test(neg) && Jump::JNE.test(1) && !Jump::JNE.test(0));
        assert!(Jump::JLE.test(0) && Jump::JLE.test(neg) && !Jump::JLE.test(1));
        assert!(Jump::JMP.test(0) && Jump::JMP.test(neg) && Jump::JMP.test(1));
    }

    #[test]
    fn bits_round_trip() {
        assert_eq!(Jump::bits(None), 0);
        assert_eq!(Jump::from_bits(0), None);
        for jump in Jump::iter() {
            assert_eq!(Jump::from_bits(Jump::bits(Some(jump))), Some(jump));
            assert_eq!(Jump::parse(&jump.to_string()), Some(jump));
        }
        assert_eq!(Jump::parse("JUMP"), None);
    }
}
