use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use laundry_dose::config::{OutputFormat, Settings};
use laundry_dose::dosing::DosingEngine;
use laundry_dose::sweep::{run_sweep, write_rows};

#[derive(Parser)]
#[command(name = "laundry-dose")]
#[command(about = "Recommends a detergent powder dose from laundry weight and dirt level")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to <config dir>/laundry-dose/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Custom rule table, overrides the one named in settings
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dose for one load, prompting for any value not given
    Dose {
        /// Laundry weight in kilograms [0-8]
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,
        /// Dirt level [1-10]
        #[arg(long, allow_negative_numbers = true)]
        dirt: Option<f64>,
    },
    /// Print the dose for every point of the configured grid
    Sweep {
        /// Output format (overrides settings)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the active rule table
    Rules,
}

fn main() {
    laundry_dose::init_tracing("warn");

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.rules.is_some() {
        settings.rules = cli.rules;
    }
    let engine = DosingEngine::new(settings.rule_table()?);

    match cli.command {
        Commands::Dose { weight, dirt } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let weight = match weight {
                Some(w) => w,
                None => prompt_number(&mut input, "Laundry weight (kg) [0-8]: ")?,
            };
            let dirt = match dirt {
                Some(d) => d,
                None => prompt_number(&mut input, "Dirt level [1-10]: ")?,
            };

            let params = engine.compute(weight, dirt)?;
            info!(weight, dirt, grams = params.powder_amount_grams, "Dose computed");
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Commands::Sweep { format } => {
            let rows = run_sweep(&engine, &settings.sweep)?;
            let format = format.unwrap_or(settings.output.format);
            let stdout = io::stdout();
            write_rows(&mut stdout.lock(), &rows, format, settings.output.precision)?;
        }
        Commands::Rules => {
            for rule in engine.rules().rules() {
                println!("{:<6} {:<4} -> {}", rule.amount, rule.level, rule.output);
            }
        }
    }

    Ok(())
}

fn prompt_number<R: BufRead>(input: &mut R, prompt: &str) -> Result<f64> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("No input for '{}'", prompt.trim_end_matches([' ', ':']));
    }
    line.trim()
        .parse::<f64>()
        .with_context(|| format!("Not a number: '{}'", line.trim()))
}
