use std::process::ExitCode;

use clap::Parser;
use color_print::{cformat, cprintln};

use s8asm::DebugMap;
use s8emu::hooks::{dump::Dump, serial::Serial, trace::Trace, Hook};
use s8emu::{Stepper, DEFAULT_MAX_TICKS};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Parser, Debug)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Executable image, or `.s8` source to assemble first
    #[arg(default_value = "main.s8.bin")]
    program: String,

    /// Tick budget
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TICKS)]
    tmax: u64,

    /// Input bytes for LES
    #[arg(short, long)]
    input: Option<String>,

    /// Read input bytes for LES from a file
    #[arg(short = 'f', long, conflicts_with = "input")]
    input_file: Option<String>,

    /// Dump configuration (YAML: address -> {stack, memory})
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Dump registers on every cycle
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Address -> source map written by the assembler
    #[arg(short, long)]
    pdb: Option<String>,

    /// Write the final state as YAML
    #[arg(short, long)]
    state_out: Option<String>,

    /// Print a trace line per cycle
    #[arg(long)]
    trace: bool,
}

fn fail(msg: String) -> ExitCode {
    cprintln!("<r,s>error</>: {}", msg);
    ExitCode::FAILURE
}

fn read_pdb(fname: &str) -> Result<DebugMap, String> {
    let yaml = std::fs::read_to_string(fname).map_err(|err| err.to_string())?;
    serde_yaml::from_str(&yaml).map_err(|err| err.to_string())
}

/// Image bytes plus debug map, if one is available.
fn load(args: &Args) -> Result<(Vec<u8>, Option<DebugMap>), ExitCode> {
    if args.program.ends_with(".s8") {
        let source = std::fs::read_to_string(&args.program).map_err(|err| {
            fail(cformat!("Failed to open file <u>{}</>: {}", args.program, err))
        })?;
        let program = s8asm::assemble(&source).map_err(|err| {
            err.print_diag(&args.program);
            ExitCode::FAILURE
        })?;
        return Ok((program.image, Some(program.debug)));
    }

    let image = std::fs::read(&args.program)
        .map_err(|err| fail(cformat!("Failed to open file <u>{}</>: {}", args.program, err)))?;
    let debug = match &args.pdb {
        Some(fname) => Some(
            read_pdb(fname).map_err(|err| fail(cformat!("Failed to read <u>{}</>: {}", fname, err)))?,
        ),
        None => None,
    };
    Ok((image, debug))
}

fn input(args: &Args) -> Result<Vec<u8>, ExitCode> {
    match (&args.input, &args.input_file) {
        (Some(text), _) => Ok(text.as_bytes().to_vec()),
        (None, Some(fname)) => std::fs::read(fname)
            .map_err(|err| fail(cformat!("Failed to open file <u>{}</>: {}", fname, err))),
        (None, None) => Ok(vec![]),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("SLEDE8 Emulator");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.program);
    println!("+-----------------------------------------------+");

    let (image, debug) = match load(&args) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let input = match input(&args) {
        Ok(input) => input,
        Err(code) => return code,
    };

    let mut stepper = match Stepper::new(&image, &input, args.tmax) {
        Ok(stepper) => stepper,
        Err(err) => return fail(err.to_string()),
    };

    // ------------------------------------------------------------------------
    // Hooks
    println!("[INIT]");
    let dump = match Dump::arg(args.dump_cfg.clone(), args.dump_all) {
        Ok(dump) => dump,
        Err(err) => return fail(err.to_string()),
    };
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(dump), Box::new(Serial::new(args.trace))];
    if args.trace {
        hooks.push(Box::new(Trace::new(debug)));
    }
    for hook in hooks.iter_mut() {
        hook.init(stepper.state());
    }

    // ------------------------------------------------------------------------
    // Main loop
    let mut fault = None;
    for step in stepper.by_ref() {
        match step {
            Ok(step) if step.done => break,
            Ok(step) => {
                let state = &step.state;
                let code = state.fetch();
                for hook in hooks.iter_mut() {
                    hook.exec(state.tick, state.pc, code, state);
                }
            }
            Err(err) => fault = Some(err),
        }
    }

    let state = stepper.state();
    for hook in hooks.iter_mut() {
        hook.finish(state);
    }
    println!("=================================================");

    if let Some(fname) = &args.state_out {
        let written = serde_yaml::to_string(state)
            .map_err(|err| err.to_string())
            .and_then(|yaml| std::fs::write(fname, yaml).map_err(|err| err.to_string()));
        if let Err(err) = written {
            return fail(cformat!("Failed to write file <u>{}</>: {}", fname, err));
        }
    }

    match fault {
        Some(err) => fail(err.to_string()),
        None => ExitCode::SUCCESS,
    }
}
