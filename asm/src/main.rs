use std::process::ExitCode;

use color_print::{cformat, cprintln};

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
    #[clap(default_value = "main.s8")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.s8.bin")]
    output: String,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Write the address -> source map as YAML
    #[clap(short, long)]
    pdb: Option<String>,
}

fn fail(msg: String) -> ExitCode {
    cprintln!("<r,s>error</>: {}", msg);
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("SLEDE8 Assembler");

    println!("1. Read File");
    println!("  < {}", args.input);
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => return fail(cformat!("Failed to open file <u>{}</>: {}", args.input, err)),
    };

    println!("2. Resolve Labels & Generate Binary");
    let program = match s8asm::assemble(&source) {
        Ok(program) => program,
        Err(err) => {
            err.print_diag(&args.input);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "  {} labels, {} lines, {} bytes",
        program.labels.len(),
        program.debug.len(),
        program.image.len()
    );

    println!("  > {}", args.output);
    if let Err(err) = std::fs::write(&args.output, &program.image) {
        return fail(cformat!("Failed to write file <u>{}</>: {}", args.output, err));
    }

    if let Some(pdb) = &args.pdb {
        println!("  > {}", pdb);
        let written = serde_yaml::to_string(&program.debug)
            .map_err(|err| err.to_string())
            .and_then(|yaml| std::fs::write(pdb, yaml).map_err(|err| err.to_string()));
        if let Err(err) = written {
            return fail(cformat!("Failed to write file <u>{}</>: {}", pdb, err));
        }
    }

    if args.dump {
        for row in s8asm::listing::cformat(&args.input, &source, &program) {
            println!("{}", row);
        }
    }

    ExitCode::SUCCESS
}
