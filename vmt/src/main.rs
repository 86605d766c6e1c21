use color_print::cprintln;
use hkvm::{
    translator::DEFAULT_ENTRY,
    util::{list_vm_files, output_path},
    Error, Translator,
};
use std::path::Path;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input .vm file or directory of .vm files
    #[clap(default_value = ".")]
    input: String,

    /// Output file [default: <dir>/<dirname>.asm or <file>.asm]
    #[clap(short, long)]
    output: Option<String>,

    /// Emit bootstrap code [default for directory input]
    #[clap(long, conflicts_with = "no_boot")]
    boot: bool,

    /// Omit bootstrap code [default for file input]
    #[clap(long)]
    no_boot: bool,

    /// Function called by the bootstrap code
    #[clap(long, default_value = DEFAULT_ENTRY)]
    entry: String,
}

/// Source being translated, kept for diagnostics.
#[derive(Default)]
struct Source {
    path: String,
    lines: Vec<String>,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("HK16 VM Translator");

    let mut source = Source::default();
    if let Err(err) = run(&args, &mut source) {
        err.print_diag(&source.path, &source.lines);
        std::process::exit(1);
    }
}

fn run(args: &Args, source: &mut Source) -> Result<(), Error> {
    use std::io::Write;

    source.path = args.input.clone();
    let input = Path::new(&args.input);
    let is_dir = input.is_dir();
    let files = if is_dir {
        list_vm_files(&args.input)?
    } else {
        vec![args.input.clone()]
    };
    let boot = (is_dir || args.boot) && !args.no_boot;
    let output = match &args.output {
        Some(output) => output.clone(),
        None => output_path(&args.input, is_dir)?,
    };

    println!("1. Read Files & Translate");
    let mut translator = Translator::new("").with_entry(&args.entry);
    let mut program = vec![];
    for (n, path) in files.iter().enumerate() {
        println!("  < {}", path);
        source.path = path.clone();
        source.lines = std::fs::read_to_string(path)
            .map_err(|e| Error::FileOpen(path.clone(), e))?
            .lines()
            .map(|s| s.to_string())
            .collect();

        let stem = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(path);
        let seen = translator.skipped().len();
        translator.set_file_name(stem);
        program.extend(translator.translate(&source.lines, boot && n == 0)?);

        for (line_num, text) in &translator.skipped()[seen..] {
            cprintln!("<yellow,bold>warning</>: skipped unknown command `{}`", text);
            cprintln!("     <blue>--></> <underline>{}:{}</>", path, line_num);
        }
    }
    if boot {
        cprintln!("  <green>note</>: bootstrap calls `{}`", args.entry);
    }

    println!("2. Write Assembly");
    println!("  > {}", output);
    let file =
        std::fs::File::create(&output).map_err(|e| Error::FileWrite(output.clone(), e))?;
    let mut file = std::io::BufWriter::new(file);
    for asm in &program {
        writeln!(file, "{}", asm).map_err(|e| Error::FileWrite(output.clone(), e))?;
    }
    file.flush().map_err(|e| Error::FileWrite(output.clone(), e))?;

    println!("  {} lines", program.len());
    Ok(())
}
