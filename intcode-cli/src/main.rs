//! Intcode - run, assemble and disassemble Intcode programs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intcode_runtime::{ScriptedInput, VMConfig, VM};
use intcode_spec::Program;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "intcode")]
#[command(about = "Run, assemble and disassemble Intcode programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a comma-separated program file
    Run {
        file: PathBuf,

        /// Scripted inputs (e.g. 1,2,3) instead of prompting on stdin
        #[arg(long)]
        input: Option<String>,

        /// Print every stored memory cell after the run
        #[arg(long)]
        dump: bool,

        /// Log each executed instruction
        #[arg(long)]
        trace: bool,

        /// Stop after this many instructions
        #[arg(long)]
        max_cycles: Option<u64>,
    },

    /// Assemble a source file and print the program
    Asm { file: PathBuf },

    /// Disassemble a program file
    Disasm { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Command::Run { trace: true, .. });
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Run {
            file,
            input,
            dump,
            trace,
            max_cycles,
        } => run(&file, input.as_deref(), dump, VMConfig { trace, max_cycles }),
        Command::Asm { file } => {
            let source = read(&file)?;
            let program = intcode_assembler::assemble(&source)
                .with_context(|| format!("Failed to assemble {}", file.display()))?;
            println!("{program}");
            Ok(())
        }
        Command::Disasm { file } => {
            let program = load_program(&file)?;
            print!("{}", intcode_disassembler::disassemble(program.words()));
            Ok(())
        }
    }
}

fn run(file: &Path, input: Option<&str>, dump: bool, config: VMConfig) -> Result<()> {
    let program = load_program(file)?;
    info!("Loaded {} words from {}", program.len(), file.display());

    let mut vm = VM::with_program(program.words(), config);
    if let Some(text) = input {
        let values: Program = text.parse().context("Invalid --input list")?;
        debug!(count = values.len(), "using scripted input");
        vm.set_input_source(ScriptedInput::new(values.into_words()));
    }

    let result = vm.run();

    if dump {
        for (address, value) in vm.dump_memory() {
            println!("{address}: {value}");
        }
    }

    let result = result.with_context(|| format!("Run of {} faulted", file.display()))?;
    info!(
        cycles = result.cycles,
        halt_reason = ?result.halt_reason,
        "finished"
    );
    Ok(())
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn load_program(file: &Path) -> Result<Program> {
    read(file)?
        .parse::<Program>()
        .with_context(|| format!("Failed to parse program {}", file.display()))
}
