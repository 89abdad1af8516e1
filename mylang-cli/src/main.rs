use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use mylang_core::RunArtifact;

/// Thin driver around the mylang pipeline: reads one source text,
/// runs every stage, and prints each stage's artifact followed by the
/// program output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file to run (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Print only the program output, without the stage dump
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let source = match cli.input {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read input file {path}"))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let artifact = mylang_core::run(&source)?;

    if !cli.quiet {
        dump_stages(&source, &artifact);
    }
    for value in &artifact.output {
        println!("{value}");
    }

    Ok(())
}

fn dump_stages(source: &str, artifact: &RunArtifact) {
    println!("=== Source ===");
    println!("{source}");
    println!("=== Tokens ===");
    println!("{:?}", artifact.tokens);
    println!("=== AST ===");
    println!("{:#?}", artifact.ast);
    println!("=== Semantic Analysis ===");
    println!("OK {:?}", artifact.symbols);
    println!("=== Optimized AST ===");
    println!("{:#?}", artifact.optimized);
    println!("=== IR ===");
    for instr in &artifact.ir {
        println!("{instr:?}");
    }
    println!("=== Execution ===");
}
