use arch::{
    alu::Comp,
    asm::{is_symbol, Asm, Imm},
    dest::Dest,
    jump::Jump,
    reg::ADDR_MAX,
};

use crate::error::Error;

/// Split a raw line into its code and its `//` comment.
pub fn split_comment(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once("//") {
        Some((code, comment)) => (code.trim(), Some(comment)),
        None => (raw.trim(), None),
    }
}

/// Parse one source line. Blank and comment-only lines give `None`.
pub fn parse_line(raw: &str) -> Result<Option<Asm>, Error> {
    let (code, _) = split_comment(raw);
    if code.is_empty() {
        return Ok(None);
    }

    // @value
    if let Some(operand) = code.strip_prefix('@') {
        return parse_imm(operand.trim()).map(|imm| Some(Asm::A(imm)));
    }

    // (label)
    if let Some(rest) = code.strip_prefix('(') {
        return match rest.strip_suffix(')').map(str::trim) {
            Some(name) if is_symbol(name) => Ok(Some(Asm::L(name.to_string()))),
            _ => Err(Error::InvalidLabel(code.to_string())),
        };
    }

    // dest=comp;jump
    let (dest, rest) = match code.split_once('=') {
        Some((dest, rest)) => (dest.trim(), rest),
        None => ("", code),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp.trim(), jump.trim()),
        None => (rest.trim(), ""),
    };

    let dest = Dest::parse(dest).ok_or_else(|| Error::UnknownDest(dest.to_string()))?;
    let comp = Comp::parse(comp).ok_or_else(|| Error::UnknownComp(comp.to_string()))?;
    let jump = match jump {
        "" => None,
        jump => Some(Jump::parse(jump).ok_or_else(|| Error::UnknownJump(jump.to_string()))?),
    };
    Ok(Some(Asm::C(dest, comp, jump)))
}

fn parse_imm(s: &str) -> Result<Imm, Error> {
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        return match s.parse::<u32>() {
            Ok(value) if value <= ADDR_MAX as u32 => Ok(Imm::Literal(value as u16)),
            Ok(_) => Err(Error::AddressOutOfRange(s.to_string())),
            Err(_) if s.chars().all(|c| c.is_ascii_digit()) => {
                Err(Error::AddressOutOfRange(s.to_string()))
            }
            Err(_) => Err(Error::InvalidSymbol(s.to_string())),
        };
    }
    match is_symbol(s) {
        true => Ok(Imm::Symbol(s.to_string())),
        false => Err(Error::InvalidSymbol(s.to_string())),
    }
}
