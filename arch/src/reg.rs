use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// General purpose virtual registers `R0`..`R15`, aliases of RAM[0..16].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u16)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

/// Segment base pointers of the bytecode machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u16)]
pub enum Ptr {
    SP,
    LCL,
    ARG,
    THIS,
    THAT,
}

// Memory map
pub const SCREEN: u16 = 0x4000;
pub const KBD: u16 = 0x6000;
pub const TEMP_BASE: u16 = 5;
pub const TEMP_SIZE: u16 = 8;
pub const VAR_BASE: u16 = 16;
pub const STACK_BASE: u16 = 256;
pub const ADDR_MAX: u16 = 0x7FFF;

/// Every predefined symbol with its address.
pub fn predefined() -> impl Iterator<Item = (String, u16)> {
    use strum::IntoEnumIterator;
    let regs = Reg::iter().map(|r| (r.to_string(), r.into()));
    let ptrs = Ptr::iter().map(|p| (p.to_string(), p.into()));
    let io = [("SCREEN".to_string(), SCREEN), ("KBD".to_string(), KBD)];
    regs.chain(ptrs).chain(io)
}

#[test]
fn test() {
    assert_eq!(u16::from(Reg::R13), 13);
    assert_eq!(u16::from(Ptr::THAT), 4);
    assert_eq!("LCL".parse::<Ptr>(), Ok(Ptr::LCL));
    assert_eq!(predefined().count(), 16 + 5 + 2);
}
