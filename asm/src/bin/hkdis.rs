use arch::inst::Inst;
use color_print::{cformat, cprintln};

#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Disassembler for HK16 architecture")]
struct Args {
    /// Input file (one 16-digit binary word per line)
    #[clap(default_value = "main.hack")]
    input: String,

    /// Plain mnemonics only, without address and binary columns
    #[clap(short, long)]
    plain: bool,
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    let text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(err) => {
            cprintln!("<red,bold>error</>: Failed to open file: {}: {}", args.input, err);
            std::process::exit(1);
        }
    };

    let mut addr: u16 = 0;
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let inst = u16::from_str_radix(line, 2)
            .ok()
            .filter(|_| line.len() == 16)
            .map(|word| (word, Inst::from_bin(word)));
        match inst {
            Some((_, Some(inst))) if args.plain => println!("{}", inst),
            Some((word, Some(inst))) => {
                println!("[{:04X}] {:016b} | {}", addr, word, inst.cformat())
            }
            Some((word, None)) => println!(
                "[{:04X}] {:016b} | {}",
                addr,
                word,
                cformat!("<r,s>illegal</>")
            ),
            None => {
                cprintln!(
                    "<red,bold>error</>: {}:{}: not a binary word: `{}`",
                    args.input,
                    idx + 1,
                    line
                );
                std::process::exit(1);
            }
        }
        addr = addr.wrapping_add(1);
    }
}
