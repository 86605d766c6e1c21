use clap::Parser;
use color_print::cprintln;
use std::collections::BTreeMap;

use hkemu::{
    hooks::{dump::Dump, trace::Trace, Hook},
    util::parse_set,
    Error, State,
};

#[derive(Parser, Debug)]
#[clap(
    name = "HK16 Emulator",
    author = "kanade-k-1228",
    version = "v1.0.0",
    about = "Emulator for HK16 ISA"
)]
struct Args {
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// Print every executed instruction
    #[arg(long)]
    trace: bool,

    #[arg(short, long)]
    dump_cfg: Option<String>,

    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Write non-zero RAM cells as YAML after the run
    #[arg(long)]
    ram_out: Option<String>,

    /// Preset RAM before the run, e.g. `--set 0=256`
    #[arg(long = "set", value_parser = parse_set)]
    set: Vec<(u16, u16)>,

    /// Binary image, or `.asm` source to assemble first
    #[arg(default_value = "main.hack")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    println!("HK16 Emulator by kanade-k-1228");

    println!("+-----------------------------------------------+");
    println!("| Emulate: {:<36} |", args.input_file);
    if let Some(fname) = &args.dump_cfg {
        println!("|  - Dump: {:<36} |", fname);
    }
    if args.dump_all {
        println!("|  - Dump: {:<36} |", "All");
    }
    println!("+-----------------------------------------------+");

    if let Err(err) = run(args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = {
        let mut cpu = State::new();
        cpu.load_rom_file(&args.input_file)?;
        for (addr, val) in &args.set {
            cpu.set(*addr, *val);
        }
        cpu
    };

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT]");
    let mut hooks: Vec<Box<dyn Hook>> = vec![
        Box::new(Trace::arg(args.trace)),
        Box::new(Dump::arg(args.dump_cfg, args.dump_all)?),
    ];
    // Apply initializations
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    // ------------------------------------------------------------------------
    // Main loop
    let mut cycles = 0;
    for time in match args.tmax {
        Some(t) => 0_u64..t,
        None => 0_u64..u64::MAX,
    } {
        if state.is_terminated() {
            break;
        }
        // Execute instruction
        let (addr, code) = state.exec(time)?;
        // Execute side effects
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, addr, code, state));
        cycles = time + 1;
    }

    // Exit
    println!("=================================================");
    match state.is_terminated() {
        true => println!("Halted after {} cycles at PC={:04X}", cycles, state.pc()),
        false => cprintln!("<yellow,bold>warning</>: stopped after {} cycles", cycles),
    }

    if let Some(fname) = &args.ram_out {
        let ram: BTreeMap<u16, u16> = state.ram_nonzero().collect();
        let file =
            std::fs::File::create(fname).map_err(|e| Error::FileWrite(fname.clone(), e))?;
        serde_yaml::to_writer(std::io::BufWriter::new(file), &ram)
            .map_err(|e| Error::RamOut(fname.clone(), e))?;
        println!("  > {}", fname);
    }
    Ok(())
}
