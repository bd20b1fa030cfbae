// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

use espalier_ast::ParseNode;
use espalier_errors::{CliError, EspalierError, Result};
use espalier_oracle::{CachingOracle, ExternalOracle};
use espalier_synthesis::{SynthesisOptions, Synthesizer};

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Infer a context-free grammar from a membership oracle and positive
/// examples.
///
/// The oracle is a shell command invoked as `<command> <file>`; exit code 0
/// accepts the candidate in the file. The examples file holds one
/// tokenised example per line, tokens separated by whitespace.
#[derive(Parser)]
#[command(name = "espalier", version, about)]
struct Cli {
    /// The oracle command.
    command: String,

    /// The tokenised-examples file.
    examples: PathBuf,

    /// Seconds an oracle call may take before it counts as an accept.
    #[arg(long, default_value_t = 3)]
    timeout_secs: u64,

    /// Suffix for the oracle's scratch files, e.g. `.mdl`.
    #[arg(long)]
    suffix: Option<String>,

    /// Seed for the token-expansion sampler.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Skip the token-expansion stage.
    #[arg(long)]
    no_expand_tokens: bool,

    /// Print the grammar as JSON instead of BNF.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let examples = load_examples(&cli.examples)?;
    tracing::info!(examples = examples.len(), command = %cli.command, "starting synthesis");

    let mut backend =
        ExternalOracle::new(&cli.command).with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(suffix) = &cli.suffix {
        backend = backend.with_suffix(suffix);
    }
    let mut oracle = CachingOracle::new(backend);

    let options = SynthesisOptions {
        expand_tokens: !cli.no_expand_tokens,
        seed: cli.seed,
        ..Default::default()
    };
    let grammar = Synthesizer::new(&mut oracle, options).synthesize(examples)?;

    tracing::info!(
        probes = oracle.parse_calls(),
        oracle_calls = oracle.real_calls(),
        oracle_time = ?oracle.time_spent(),
        "oracle statistics"
    );

    if cli.json {
        let rendered = serde_json::to_string_pretty(&grammar)
            .map_err(|error| CliError::GrammarSerialisation(error.to_string()))?;
        println!("{rendered}");
    } else {
        print!("{grammar}");
    }
    Ok(())
}

/// Reads one whitespace-tokenised example per non-empty line.
fn load_examples(path: &PathBuf) -> Result<Vec<Vec<ParseNode>>> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        EspalierError::from(CliError::ExamplesFileRead { path: path.clone(), source })
    })?;
    Ok(contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(ParseNode::terminal).collect())
        .collect())
}
