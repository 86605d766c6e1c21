use hkasm::{assembler, util, Assembler, Error};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file [default: input with .hack extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump listing and symbol table
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("HK16 Assembler");

    let output = args.output.clone().unwrap_or_else(|| {
        let stem = args.input.strip_suffix(".asm").unwrap_or(&args.input);
        format!("{}.hack", stem)
    });

    let mut lines = vec![];
    if let Err(err) = run(&args, &output, &mut lines) {
        err.print_diag(&args.input, &lines);
        std::process::exit(1);
    }
}

fn run(args: &Args, output: &str, lines: &mut Vec<String>) -> Result<(), Error> {
    use std::io::{BufRead, Write};

    println!("1. Read File and Parse Lines");
    println!("  < {}", args.input);
    let file = std::fs::File::open(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?;
    for raw in std::io::BufReader::new(file).lines() {
        lines.push(raw.map_err(Error::FileRead)?);
    }
    let program = assembler::parse(lines.as_slice())?;

    println!("2. Resolve Symbols & Generate Binary");
    let mut asm = Assembler::new();
    let words = asm.assemble_program(&program)?;

    println!("  > {}", output);
    let file =
        std::fs::File::create(output).map_err(|e| Error::FileCreate(output.to_string(), e))?;
    let mut file = std::io::BufWriter::new(file);
    for word in &words {
        writeln!(file, "{:016b}", word).map_err(|e| Error::FileWrite(output.to_string(), e))?;
    }
    file.flush()
        .map_err(|e| Error::FileWrite(output.to_string(), e))?;

    if args.dump {
        util::print_dump(&args.input, lines, &program, asm.symbols());
        util::print_symbols(asm.symbols());
    }
    println!("  {} instructions", words.len());
    Ok(())
}
