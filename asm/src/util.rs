use arch::asm::Asm;
use color_print::cformat;

use crate::{
    assembler::encode,
    parser::split_comment,
    symbols::{SymbolKind, SymbolTable},
};

/// Print a listing of the source with the address and word of each instruction.
pub fn print_dump(path: &str, lines: &[String], program: &[(usize, Asm)], symbols: &SymbolTable) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(25),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    let mut stmts = program.iter().peekable();
    let mut pc: u16 = 0;
    for (idx, raw) in lines.iter().enumerate() {
        let (_, comment) = split_comment(raw);
        let comment = comment.map(|s| format!("//{}", s)).unwrap_or_default();
        let line_num = idx + 1;

        let here = matches!(stmts.peek(), Some((stmt_idx, _)) if *stmt_idx == idx);
        let stmt = match here {
            true => stmts.next().map(|(_, asm)| asm),
            false => None,
        };

        let body = match stmt {
            None => format!("{:25}| {:>4}: {}", "", line_num, comment),
            Some(asm @ Asm::L(_)) => {
                format!("{:25}| {:>4}: {} {}", "", line_num, asm.cformat(), comment)
            }
            Some(asm) => {
                let bin = match encode(symbols, asm) {
                    Ok(bin) => format!("{:016b}", bin),
                    Err(_) => cformat!("<r,s>{}</>", "!".repeat(16)),
                };
                let body = format!(
                    "[{:04X}] {} | {:>4}:   {} {}",
                    pc,
                    bin,
                    line_num,
                    asm.cformat(),
                    comment
                );
                pc = pc.wrapping_add(1);
                body
            }
        };
        println!("{}", body);
    }
    println!("-------------------------+-----------------------------------------------------");
}

/// Print every non-predefined symbol.
pub fn print_symbols(symbols: &SymbolTable) {
    for (name, kind, addr) in symbols.iter() {
        let kind = match kind {
            SymbolKind::Predefined => continue,
            SymbolKind::Label => cformat!("<g>label</>"),
            SymbolKind::Variable => cformat!("<c>var  </>"),
        };
        println!(" {} 0x{:04X} {}", kind, addr, name);
    }
}
