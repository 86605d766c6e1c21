use crate::{
    alu::Comp,
    dest::Dest,
    inst::Inst,
    jump::Jump,
    reg::{Ptr, Reg},
};

use color_print::cformat;
use std::fmt;

/// Operand of an address instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(u16),
    Symbol(String),
}

impl From<u16> for Imm {
    fn from(value: u16) -> Self {
        Imm::Literal(value)
    }
}

impl From<&str> for Imm {
    fn from(name: &str) -> Self {
        Imm::Symbol(name.to_string())
    }
}

impl From<String> for Imm {
    fn from(name: String) -> Self {
        Imm::Symbol(name)
    }
}

impl From<Reg> for Imm {
    fn from(reg: Reg) -> Self {
        Imm::Symbol(reg.to_string())
    }
}

impl From<Ptr> for Imm {
    fn from(ptr: Ptr) -> Self {
        Imm::Symbol(ptr.to_string())
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imm::Literal(value) => write!(f, "{}", value),
            Imm::Symbol(name) => write!(f, "{}", name),
        }
    }
}

/// One line of symbolic assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asm {
    /// `@imm`
    A(Imm),
    /// `(name)`, binds `name` to the next instruction
    L(String),
    /// `dest=comp;jump`
    C(Dest, Comp, Option<Jump>),
}

impl Asm {
    pub fn at(imm: impl Into<Imm>) -> Asm {
        Asm::A(imm.into())
    }

    pub fn label(name: impl Into<String>) -> Asm {
        Asm::L(name.into())
    }

    pub fn set(dest: Dest, comp: Comp) -> Asm {
        Asm::C(dest, comp, None)
    }

    pub fn jump(comp: Comp, jump: Jump) -> Asm {
        Asm::C(Dest::NONE, comp, Some(jump))
    }

    /// Whether the line occupies an instruction slot.
    pub fn is_inst(&self) -> bool {
        !matches!(self, Asm::L(_))
    }

    /// Lower to a machine instruction, looking symbols up with `lookup`.
    /// Returns `None` for labels and unresolved symbols.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<u16>) -> Option<Inst> {
        match self {
            Asm::A(Imm::Literal(value)) => Some(Inst::A(*value)),
            Asm::A(Imm::Symbol(name)) => lookup(name.as_str()).map(Inst::A),
            Asm::L(_) => None,
            Asm::C(dest, comp, jump) => Some(Inst::C(*dest, *comp, *jump)),
        }
    }
}

/// Symbols are letters, digits, `_`, `.`, `$` and `:`, not starting with a digit.
pub fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if !head.is_ascii_digit() && is_symbol_char(head) => chars.all(is_symbol_char),
        _ => false,
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asm::A(imm) => write!(f, "@{}", imm),
            Asm::L(name) => write!(f, "({})", name),
            Asm::C(dest, comp, jump) => write!(f, "{}", Inst::C(*dest, *comp, *jump)),
        }
    }
}

impl Asm {
    pub fn cformat(&self) -> String {
        match self {
            Asm::A(Imm::Literal(value)) => cformat!("<r>@</><y>{}</>", value),
            Asm::A(Imm::Symbol(name)) => cformat!("<r>@</><c>{}</>", name),
            Asm::L(name) => cformat!("<g,s>({})</>", name),
            Asm::C(dest, comp, jump) => Inst::C(*dest, *comp, *jump).cformat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Asm::at(Ptr::SP).to_string(), "@SP");
        assert_eq!(Asm::at(17u16).to_string(), "@17");
        assert_eq!(Asm::label("Main.fib$ret.1").to_string(), "(Main.fib$ret.1)");
        assert_eq!(Asm::set(Dest::AM, Comp::MMinusOne).to_string(), "AM=M-1");
        assert_eq!(Asm::jump(Comp::Zero, Jump::JMP).to_string(), "0;JMP");
    }

    #[test]
    fn symbols() {
        assert!(is_symbol("LOOP"));
        assert!(is_symbol("Main.fib$ret.1"));
        assert!(is_symbol("_x:y"));
        assert!(!is_symbol("1abc"));
        assert!(!is_symbol(""));
        assert!(!is_symbol("a-b"));
    }

    #[test]
    fn resolve() {
        let lookup = |name: &str| (name == "X").then_some(42);
        assert_eq!(Asm::at("X").resolve(lookup), Some(Inst::A(42)));
        assert_eq!(Asm::at("Y").resolve(lookup), None);
        assert_eq!(Asm::label("X").resolve(lookup), None);
    }
}
