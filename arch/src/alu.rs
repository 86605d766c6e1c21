use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Computation field of a compute instruction.
///
/// The discriminant is the 7-bit `a c1 c2 c3 c4 c5 c6` pattern. `a` selects
/// `M` instead of `A` as the second ALU operand, `c1..c6` are the ALU control
/// lines `zx nx zy ny f no`.
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
pub enum Comp {
    #[strum(to_string = "0")]
    Zero = 0b0101010,
    #[strum(to_string = "1")]
    One = 0b0111111,
    #[strum(to_string = "-1")]
    NegOne = 0b0111010,
    #[strum(to_string = "D")]
    D = 0b0001100,
    #[strum(to_string = "A")]
    A = 0b0110000,
    #[strum(to_string = "M")]
    M = 0b1110000,
    #[strum(to_string = "!D")]
    NotD = 0b0001101,
    #[strum(to_string = "!A")]
    NotA = 0b0110001,
    #[strum(to_string = "!M")]
    NotM = 0b1110001,
    #[strum(to_string = "-D")]
    NegD = 0b0001111,
    #[strum(to_string = "-A")]
    NegA = 0b0110011,
    #[strum(to_string = "-M")]
    NegM = 0b1110011,
    #[strum(to_string = "D+1")]
    DPlusOne = 0b0011111,
    #[strum(to_string = "A+1")]
    APlusOne = 0b0110111,
    #[strum(to_string = "M+1")]
    MPlusOne = 0b1110111,
    #[strum(to_string = "D-1")]
    DMinusOne = 0b0001110,
    #[strum(to_string = "A-1")]
    AMinusOne = 0b0110010,
    #[strum(to_string = "M-1")]
    MMinusOne = 0b1110010,
    #[strum(to_string = "D+A", serialize = "A+D")]
    DPlusA = 0b0000010,
    #[strum(to_string = "D+M", serialize = "M+D")]
    DPlusM = 0b1000010,
    #[strum(to_string = "D-A")]
    DMinusA = 0b0010011,
    #[strum(to_string = "D-M")]
    DMinusM = 0b1010011,
    #[strum(to_string = "A-D")]
    AMinusD = 0b0000111,
    #[strum(to_string = "M-D")]
    MMinusD = 0b1000111,
    #[strum(to_string = "D&A", serialize = "A&D")]
    DAndA = 0b0000000,
    #[strum(to_string = "D&M", serialize = "M&D")]
    DAndM = 0b1000000,
    #[strum(to_string = "D|A", serialize = "A|D")]
    DOrA = 0b0010101,
    #[strum(to_string = "D|M", serialize = "M|D")]
    DOrM = 0b1010101,
}

impl Comp {
    const A_BIT: u8 = 0b1000000;

    /// Parse a computation mnemonic. Whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        s.parse::<Self>().ok()
    }

    pub fn bits(self) -> u8 {
        self.into()
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::try_from(bits & 0x7F).ok()
    }

    /// True when the second operand is `M` (memory at `A`).
    pub fn reads_memory(self) -> bool {
        self.bits() & Self::A_BIT != 0
    }

    /// Evaluate with `d` as the first operand and `am` as `A` or `M`,
    /// whichever [`Comp::reads_memory`] selects.
    pub fn eval(self, d: u16, am: u16) -> u16 {
        alu(self.bits() & 0b111111, d, am)
    }
}

/// ALU model driven by the control lines `zx nx zy ny f no` (MSB first).
pub fn alu(ctrl: u8, x: u16, y: u16) -> u16 {
    let bit = |n: u8| ctrl & (1 << n) != 0;
    let x = if bit(5) { 0 } else { x };
    let x = if bit(4) { !x } else { x };
    let y = if bit(3) { 0 } else { y };
    let y = if bit(2) { !y } else { y };
    let out = if bit(1) { x.wrapping_add(y) } else { x & y };
    if bit(0) {
        !out
    } else {
        out
    }
}
