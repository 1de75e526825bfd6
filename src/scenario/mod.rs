//! # Scenario Driver
//!
//! Runs a scenario's steps one after another against a [`Transport`] and
//! verifies each response. A failing step does not stop the scenario unless
//! the driver was built with [`FailurePolicy::Abort`]; the remaining steps are
//! then reported as skipped.

pub mod catalogue;

use std::time::Instant;

use serde::{Serialize, Serializer};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::ContractError;
use crate::http::{ApiRequest, HttpMethod, Transport};
use crate::verify::{Expectation, verify};

/// One request in a scenario. Steps without an expectation are setup steps:
/// their response is logged, never asserted.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub request: ApiRequest,
    pub expectation: Option<Expectation>,
}

impl Step {
    pub fn checked(name: impl Into<String>, request: ApiRequest, expectation: Expectation) -> Self {
        Self {
            name: name.into(),
            request,
            expectation: Some(expectation),
        }
    }

    pub fn setup(name: impl Into<String>, request: ApiRequest) -> Self {
        Self {
            name: name.into(),
            request,
            expectation: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
}

/// What to do with the rest of a scenario once a step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepVerdict {
    Passed,
    Unchecked,
    Failed,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub status: Option<u16>,
    pub duration_ms: u64,
    pub verdict: StepVerdict,
    #[serde(serialize_with = "serialize_messages")]
    pub failures: Vec<ContractError>,
}

impl StepReport {
    fn new(step: &Step, verdict: StepVerdict) -> Self {
        Self {
            name: step.name.clone(),
            method: step.request.method,
            path: step.request.path.clone(),
            status: None,
            duration_ms: 0,
            verdict,
            failures: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn push(&mut self, step: StepReport) {
        self.total += 1;
        match step.verdict {
            StepVerdict::Passed => self.passed += 1,
            StepVerdict::Failed => self.failed += 1,
            StepVerdict::Skipped => self.skipped += 1,
            StepVerdict::Unchecked => {}
        }
        self.steps.push(step);
    }

    pub fn succeeded(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

/// Summary report for a batch of scenarios.
#[derive(Debug, Default, Serialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

pub struct ScenarioDriver<T> {
    transport: T,
    policy: FailurePolicy,
}

impl<T: Transport> ScenarioDriver<T> {
    pub fn new(transport: T, policy: FailurePolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run scenarios one at a time, in order.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> SuiteReport {
        let started = Instant::now();
        let mut suite = SuiteReport::default();

        for scenario in scenarios {
            let report = self.run(scenario).await;
            suite.total += 1;
            if report.succeeded() {
                suite.passed += 1;
            } else {
                suite.failed += 1;
            }
            suite.scenarios.push(report);
        }

        suite.duration_ms = elapsed_ms(started);
        info!(
            total = suite.total,
            passed = suite.passed,
            failed = suite.failed,
            "suite finished"
        );
        suite
    }

    pub async fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let span = info_span!("scenario", name = %scenario.name);
        self.run_steps(scenario).instrument(span).await
    }

    async fn run_steps(&self, scenario: &Scenario) -> ScenarioReport {
        let started = Instant::now();
        let mut report = ScenarioReport::new(&scenario.name);
        let mut aborted = false;

        for step in &scenario.steps {
            if aborted {
                debug!(step = %step.name, "skipped after earlier failure");
                report.push(StepReport::new(step, StepVerdict::Skipped));
                continue;
            }

            let span = info_span!(
                "step",
                name = %step.name,
                method = %step.request.method,
                path = %step.request.path
            );
            let step_report = self.run_step(step).instrument(span).await;

            if step_report.verdict == StepVerdict::Failed && self.policy == FailurePolicy::Abort {
                warn!(step = %step.name, "aborting scenario");
                aborted = true;
            }
            report.push(step_report);
        }

        report.duration_ms = elapsed_ms(started);
        info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "scenario finished"
        );
        report
    }

    async fn run_step(&self, step: &Step) -> StepReport {
        let outcome = match self.transport.send(&step.request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "transport failure");
                let mut report = StepReport::new(step, StepVerdict::Failed);
                report.failures.push(ContractError::Transport(err));
                return report;
            }
        };

        let Some(expectation) = &step.expectation else {
            debug!(status = outcome.status, "setup step, response not asserted");
            let mut report = StepReport::new(step, StepVerdict::Unchecked);
            report.status = Some(outcome.status);
            report.duration_ms = outcome.duration_ms;
            return report;
        };

        let verification = verify(&outcome, expectation);
        let verdict = if verification.passed() {
            debug!(status = outcome.status, "contract holds");
            StepVerdict::Passed
        } else {
            for failure in &verification.failures {
                warn!(status = outcome.status, "{failure}");
            }
            StepVerdict::Failed
        };

        let mut report = StepReport::new(step, verdict);
        report.status = Some(outcome.status);
        report.duration_ms = outcome.duration_ms;
        report.failures = verification.failures;
        report
    }
}

fn serialize_messages<S: Serializer>(
    failures: &[ContractError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(ToString::to_string))
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
