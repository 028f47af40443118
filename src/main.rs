mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::error::AppError;
use crate::input::InputPaths;
use crate::model::config::{AnalysisConfig, MismatchPolicy};
use crate::model::probe::ProbeField;
use crate::pipeline::run_analysis;
use crate::pipeline::stage4_report::{Stage4Input, write_reports};

/// Find genes expressed uniquely in, or shared between, two brain structures.
#[derive(Debug, Parser)]
#[command(name = "kira-regionexpr", version)]
struct Cli {
    /// First structure acronym, matched against structure_acronym
    first_structure: String,
    /// Second structure acronym
    second_structure: String,
    /// Minimum expression value counted as expressed
    #[arg(allow_negative_numbers = true)]
    threshold: f64,
    /// Expression matrix CSV (no header, probe id then one value per sample)
    expression: PathBuf,
    /// Probe table CSV
    probes: PathBuf,
    /// Sample annotation CSV
    samples: PathBuf,

    /// Probe field printed for each gene
    #[arg(long = "display", value_enum, default_value_t = ProbeField::GeneSymbol)]
    display: ProbeField,
    /// Warn and continue when probe and expression rows are misaligned
    #[arg(long = "allow-mismatch")]
    allow_mismatch: bool,
    /// Also write a JSON summary to this path
    #[arg(long = "json")]
    json: Option<PathBuf>,
}

impl Cli {
    fn analysis_config(&self) -> Result<AnalysisConfig, AppError> {
        let policy = if self.allow_mismatch {
            MismatchPolicy::Warn
        } else {
            MismatchPolicy::Fail
        };
        Ok(AnalysisConfig::new(
            vec![self.first_structure.clone(), self.second_structure.clone()],
            self.threshold,
            self.display,
            policy,
        )?)
    }

    fn input_paths(&self) -> InputPaths {
        InputPaths {
            expression: self.expression.clone(),
            probes: self.probes.clone(),
            samples: self.samples.clone(),
        }
    }
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = cli.analysis_config()?;
    let paths = cli.input_paths();
    paths.validate()?;

    println!("Starting Analysis...\n");

    let output = run_analysis(&paths, &config)?;

    let input = Stage4Input {
        config: &config,
        aggregate: &output.aggregate,
        classification: &output.classification,
    };
    {
        let mut out = io::stdout().lock();
        write_reports(&input, &mut out, cli.json.as_deref()).map_err(AppError::Report)?;
    }

    println!("Analysis Complete.");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
