use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use runiq_core::engine;
use runiq_core::options::{EmitMode, Options};

#[derive(Parser)]
#[command(
    name = "runiq",
    version,
    about = "Collapse consecutive duplicate lines, uniq-style"
)]
struct Cli {
    /// Prefix each line with the number of consecutive occurrences
    #[arg(short = 'c', long = "count", group = "emit")]
    count: bool,

    /// Print only lines that repeat
    #[arg(short = 'd', long = "repeated", group = "emit")]
    repeated: bool,

    /// Print only lines that do not repeat
    #[arg(short = 'u', long = "unique", group = "emit")]
    unique: bool,

    /// Ignore case when comparing lines
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Skip the first NUM space-separated fields when comparing
    #[arg(
        short = 'f',
        long = "skip-fields",
        value_name = "NUM",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    skip_fields: i64,

    /// Skip the first NUM characters when comparing
    #[arg(
        short = 's',
        long = "skip-chars",
        value_name = "NUM",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    skip_chars: i64,

    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    output: Option<PathBuf>,
}

impl Cli {
    fn mode(&self) -> EmitMode {
        // clap's `emit` group guarantees at most one flag is set.
        if self.count {
            EmitMode::Counted
        } else if self.repeated {
            EmitMode::DuplicatesOnly
        } else if self.unique {
            EmitMode::UniquesOnly
        } else {
            EmitMode::Plain
        }
    }

    fn options(&self) -> Options {
        Options {
            mode: self.mode(),
            ignore_case: self.ignore_case,
            // Zero or negative means "no skip".
            skip_fields: self.skip_fields.max(0) as usize,
            skip_chars: self.skip_chars.max(0) as usize,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("runiq: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file '{}'", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(stdin.lock()),
    };

    let stdout = io::stdout();
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(stdout.lock())),
    };

    engine::process(input, &mut output, &cli.options())
}
