//! Test orchestrator
//!
//! Drives one full smoke-test run through its phases: authenticate, run the
//! scenarios in fixed order, then report. Scenario failures abort the
//! remaining scenarios but never the report; only preflight and report
//! writing can return an `Error`.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, error, info};

use crate::client::{CallRecord, RequestExecutor};
use crate::common::Result;
use crate::report::Report;
use crate::scenario::{self, Ctx};
use crate::session::Session;

/// Orchestrator phase; transitions are one-way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Authenticating,
    RunningScenarios,
    Reporting,
    Done,
}

/// Login credential pair sent to `/login`
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

/// Outcome of one full run
#[derive(Debug)]
pub struct RunOutcome {
    pub authenticated: bool,
    /// Description of a scenario-level failure, if one aborted the run
    pub scenario_error: Option<String>,
    pub total_calls: usize,
    pub failed_calls: usize,
    pub report_path: PathBuf,
}

impl RunOutcome {
    /// The run is green only when login succeeded, no scenario aborted, and
    /// every call passed.
    pub fn is_green(&self) -> bool {
        self.authenticated && self.scenario_error.is_none() && self.failed_calls == 0
    }
}

pub struct Harness {
    executor: RequestExecutor,
    session: Session,
    records: Vec<CallRecord>,
    credentials: Credentials,
    phase: Phase,
}

impl Harness {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(base_url)?,
            session: Session::new(),
            records: Vec::new(),
            credentials,
            phase: Phase::NotStarted,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Probe connectivity before any test traffic
    pub async fn preflight(&self) -> Result<()> {
        self.executor.preflight().await
    }

    /// Run the whole suite and write the report into `report_dir`.
    pub async fn run(&mut self, report_dir: &Path) -> Result<RunOutcome> {
        info!("starting smoke test against {}", self.executor.base_url());

        self.transition(Phase::Authenticating);
        let authenticated = self.login().await;

        let mut scenario_error = None;
        if authenticated {
            self.transition(Phase::RunningScenarios);
            scenario_error = self.run_scenarios().await;
        } else {
            error!("login failed, skipping all scenarios");
        }

        self.transition(Phase::Reporting);
        let report = Report::from_records(&self.records);
        let report_path = report.write_to(report_dir)?;
        report.print_summary(&self.records, Some(&report_path));

        let failed_calls = self.records.iter().filter(|r| !r.success).count();
        self.transition(Phase::Done);

        Ok(RunOutcome {
            authenticated,
            scenario_error,
            total_calls: self.records.len(),
            failed_calls,
            report_path,
        })
    }

    /// POST `/login` and stash the returned token. Any failure, including a
    /// 2xx response without a token, leaves the session unauthenticated.
    async fn login(&mut self) -> bool {
        info!("authenticating as '{}'", self.credentials.account);

        let body = json!({
            "account": self.credentials.account,
            "password": self.credentials.password,
        });

        let mut ctx = Ctx::new(&self.executor, &mut self.session, &mut self.records);
        let record = ctx.post_unauthed("/login", body).await;

        if !record.success {
            return false;
        }

        match record.data_str("token") {
            Some(token) if !token.is_empty() => {
                self.session.set_token(token.to_string());
                true
            }
            _ => {
                error!("login response did not contain a token");
                false
            }
        }
    }

    /// Run the scenarios in fixed order. The first scenario-level error
    /// aborts the remaining ones; the collected records are kept for the
    /// report either way.
    async fn run_scenarios(&mut self) -> Option<String> {
        let mut ctx = Ctx::new(&self.executor, &mut self.session, &mut self.records);

        let outcome = async {
            scenario::members(&mut ctx).await?;
            scenario::customers(&mut ctx).await?;
            scenario::order_categories(&mut ctx).await?;
            scenario::orders(&mut ctx).await?;
            scenario::system_config(&mut ctx).await?;
            scenario::operation_logs(&mut ctx).await?;
            Ok::<(), crate::Error>(())
        }
        .await;

        match outcome {
            Ok(()) => None,
            Err(e) => {
                error!("scenario aborted the run: {e}");
                Some(e.to_string())
            }
        }
    }

    fn transition(&mut self, next: Phase) {
        debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
