//! # Command-line runner
//!
//! `reqres-contract` runs the scenario catalogue against a live API and exits
//! non-zero when any contract is broken, so it can gate a CI pipeline.

use std::fmt::Write as _;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, HarnessConfig};
use crate::error::ContractError;
use crate::scenario::catalogue::reqres_catalogue;
use crate::scenario::{Scenario, ScenarioDriver, StepVerdict, SuiteReport};

#[derive(Debug, Parser)]
#[command(
    name = "reqres-contract",
    version,
    about = "Verify the reqres.in API against its contract"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: HarnessConfig,

    /// Run only the named scenario. Repeatable.
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Print the scenario names and exit.
    #[arg(long)]
    pub list: bool,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build the scenario catalogue: {0}")]
    Catalogue(#[from] ContractError),
    #[error("unknown scenario `{name}` (use --list to see the catalogue)")]
    UnknownScenario { name: String },
    #[error("failed to render the report: {0}")]
    Render(#[source] serde_json::Error),
}

pub async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let catalogue = reqres_catalogue()?;

    if cli.list {
        for scenario in &catalogue {
            println!("{:<28} {}", scenario.name, scenario.description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let selected = select(catalogue, &cli.scenarios)?;
    let transport = cli.config.transport()?;
    info!(
        base_url = %transport.base_url(),
        scenarios = selected.len(),
        "running contract checks"
    );

    let driver = ScenarioDriver::new(transport, cli.config.failure_policy());
    let report = driver.run_all(&selected).await;

    let rendered = match cli.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report).map_err(CliError::Render)?,
    };
    println!("{rendered}");

    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Keep catalogue order; an empty filter selects everything.
pub fn select(catalogue: Vec<Scenario>, names: &[String]) -> Result<Vec<Scenario>, CliError> {
    if let Some(unknown) = names
        .iter()
        .find(|name| !catalogue.iter().any(|scenario| &scenario.name == *name))
    {
        return Err(CliError::UnknownScenario {
            name: unknown.clone(),
        });
    }

    if names.is_empty() {
        return Ok(catalogue);
    }
    Ok(catalogue
        .into_iter()
        .filter(|scenario| names.contains(&scenario.name))
        .collect())
}

pub fn render_text(report: &SuiteReport) -> String {
    let mut out = String::new();

    for scenario in &report.scenarios {
        let label = if scenario.succeeded() { "PASS" } else { "FAIL" };
        let noun = if scenario.total == 1 { "step" } else { "steps" };
        let _ = writeln!(
            out,
            "{label} {} ({} {noun}, {} ms)",
            scenario.name, scenario.total, scenario.duration_ms
        );

        for step in &scenario.steps {
            if step.verdict == StepVerdict::Passed {
                continue;
            }
            let status = step
                .status
                .map_or_else(|| "-".to_string(), |status| status.to_string());
            let verdict = match step.verdict {
                StepVerdict::Passed => "passed",
                StepVerdict::Unchecked => "unchecked",
                StepVerdict::Failed => "failed",
                StepVerdict::Skipped => "skipped",
            };
            let _ = writeln!(
                out,
                "  {verdict:<9} {} {} -> {status}  ({})",
                step.method, step.path, step.name
            );
            for failure in &step.failures {
                let _ = writeln!(out, "            {failure}");
            }
        }
    }

    let _ = write!(
        out,
        "{}/{} scenarios passed in {} ms",
        report.passed, report.total, report.duration_ms
    );
    out
}
