use crate::{alu::Comp, dest::Dest, jump::Jump, reg::ADDR_MAX};

use color_print::cformat;
use std::fmt;

/// A machine instruction with every symbol resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    /// `@value`: load a 15-bit constant into `A`.
    A(u16),
    /// `dest=comp;jump`
    C(Dest, Comp, Option<Jump>),
}

impl Inst {
    const C_TAG: u16 = 0b111 << 13;

    pub fn to_bin(&self) -> u16 {
        match self {
            Inst::A(value) => value & ADDR_MAX,
            Inst::C(dest, comp, jump) => {
                Self::C_TAG
                    | (comp.bits() as u16) << 6
                    | (dest.bits() as u16) << 3
                    | Jump::bits(*jump) as u16
            }
        }
    }

    /// Decode a word. Bits 14 and 13 of a compute word are not checked, the
    /// same as the hardware. Returns `None` for an unknown computation.
    pub fn from_bin(bin: u16) -> Option<Inst> {
        if bin & 0x8000 == 0 {
            return Some(Inst::A(bin));
        }
        let comp = Comp::from_bits((bin >> 6) as u8)?;
        let dest = Dest::from_bits((bin >> 3) as u8 & 0b111);
        let jump = Jump::from_bits(bin as u8);
        Some(Inst::C(dest, comp, jump))
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::A(value) => write!(f, "@{}", value),
            Inst::C(dest, comp, jump) => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self {
            Inst::A(value) => cformat!("<r>@</><y>{}</>", value),
            Inst::C(dest, comp, jump) => {
                let dest = match dest.is_empty() {
                    true => String::new(),
                    false => cformat!("<b>{}</>=", dest),
                };
                let jump = match jump {
                    Some(jump) => cformat!(";<r>{}</>", jump),
                    None => String::new(),
                };
                cformat!("{}<g>{}</>{}", dest, comp, jump)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    macro_rules! test_bin {
        ($($name:ident: $inst:expr => $bin:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    assert_eq!(format!("{:016b}", inst.to_bin()), $bin);
                    assert_eq!(Inst::from_bin(inst.to_bin()), Some(inst));
                }
            )*
        }
    }

    test_bin! {
        test_a_zero: Inst::A(0) => "0000000000000000",
        test_a_max: Inst::A(32767) => "0111111111111111",
        test_a_21: Inst::A(21) => "0000000000010101",
        test_d_eq_a: Inst::C(Dest::D, Comp::A, None) => "1110110000010000",
        test_d_eq_d_plus_a: Inst::C(Dest::D, Comp::DPlusA, None) => "1110000010010000",
        test_m_eq_d: Inst::C(Dest::M, Comp::D, None) => "1110001100001000",
        test_am_eq_m_minus_one: Inst::C(Dest::AM, Comp::MMinusOne, None) => "1111110010101000",
        test_jmp: Inst::C(Dest::NONE, Comp::Zero, Some(Jump::JMP)) => "1110101010000111",
        test_d_jne: Inst::C(Dest::NONE, Comp::D, Some(Jump::JNE)) => "1110001100000101",
        test_amd_jle: Inst::C(Dest::AMD, Comp::DOrM, Some(Jump::JLE)) => "1111010101111110",
    }

    #[test]
    fn every_field_round_trips() {
        let jumps = std::iter::once(None).chain(Jump::iter().map(Some));
        for jump in jumps {
            for dest in Dest::all() {
                for comp in Comp::iter() {
                    let inst = Inst::C(dest, comp, jump);
                    let bin = inst.to_bin();
                    assert_eq!(bin >> 13, 0b111);
                    assert_eq!(Inst::from_bin(bin), Some(inst));
                }
            }
        }
    }

    #[test]
    fn unknown_comp_is_rejected() {
        assert_eq!(Inst::from_bin(0b1111_1111_1100_0000), None);
    }

    #[test]
    fn display() {
        assert_eq!(Inst::A(7).to_string(), "@7");
        assert_eq!(Inst::C(Dest::MD, Comp::MPlusOne, None).to_string(), "MD=M+1");
        assert_eq!(Inst::C(Dest::NONE, Comp::D, Some(Jump::JGT)).to_string(), "D;JGT");
    }
}
