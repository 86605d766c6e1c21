use arch::{
    asm::{Asm, Imm},
    inst::Inst,
    reg::ADDR_MAX,
};

use crate::{error::Error, parser::parse_line, symbols::SymbolTable};

/// Two-pass assembler for one assembly unit.
///
/// Pass 1 binds labels to instruction addresses. Pass 2 first resolves every
/// unknown address operand into a fresh variable, then encodes each
/// instruction with [`encode`], which never touches the table.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    symbols: SymbolTable,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            symbols: SymbolTable::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Assemble source lines into one 16-character binary string per instruction.
    pub fn assemble<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<String>, Error> {
        let words = self.assemble_words(lines)?;
        Ok(words.iter().map(|word| format!("{:016b}", word)).collect())
    }

    /// Assemble source lines into the binary image.
    pub fn assemble_words<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<u16>, Error> {
        let program = parse(lines)?;
        self.assemble_program(&program)
    }

    /// Assemble already parsed instructions, e.g. straight from the translator.
    pub fn assemble_program(&mut self, program: &[(usize, Asm)]) -> Result<Vec<u16>, Error> {
        self.first_pass(program)?;
        self.resolve(program)?;
        program
            .iter()
            .filter(|(_, asm)| asm.is_inst())
            .map(|(idx, asm)| encode(&self.symbols, asm).map_err(|e| e.at(*idx)))
            .collect()
    }

    /// Bind every label to the address of the next instruction.
    pub fn first_pass(&mut self, program: &[(usize, Asm)]) -> Result<(), Error> {
        let mut pc: usize = 0;
        for (_, asm) in program {
            match asm {
                Asm::L(name) => self.symbols.add_entry(name, pc as u16),
                _ => pc += 1,
            }
            if pc > ADDR_MAX as usize + 1 {
                return Err(Error::RomOverflow(pc));
            }
        }
        Ok(())
    }

    /// Allocate a variable for every symbol still unknown after pass 1,
    /// in order of first reference.
    pub fn resolve(&mut self, program: &[(usize, Asm)]) -> Result<(), Error> {
        for (idx, asm) in program {
            if let Asm::A(Imm::Symbol(name)) = asm {
                if !self.symbols.contains(name) {
                    self.symbols.add_variable(name).map_err(|e| e.at(*idx))?;
                }
            }
        }
        Ok(())
    }
}

/// Encode one instruction against a resolved table.
pub fn encode(symbols: &SymbolTable, asm: &Asm) -> Result<u16, Error> {
    match asm.resolve(|name| symbols.get_address(name)) {
        Some(Inst::A(value)) if value > ADDR_MAX => match asm {
            Asm::A(imm) => Err(Error::AddressOutOfRange(imm.to_string())),
            _ => Err(Error::AddressOutOfRange(value.to_string())),
        },
        Some(inst) => Ok(inst.to_bin()),
        None => match asm {
            Asm::A(imm) => Err(Error::UndefinedSymbol(imm.to_string())),
            other => Err(Error::InvalidLabel(other.to_string())),
        },
    }
}

/// Parse source lines, keeping the 0-based line index of each statement.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Vec<(usize, Asm)>, Error> {
    let mut program = vec![];
    for (idx, line) in lines.iter().enumerate() {
        if let Some(asm) = parse_line(line.as_ref()).map_err(|e| e.at(idx))? {
            program.push((idx, asm));
        }
    }
    Ok(program)
}

/// Assemble with a fresh symbol table.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, Error> {
    Assembler::new().assemble(lines)
}
