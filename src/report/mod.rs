//! Report generation
//!
//! The report is a read-only aggregate over the run's call records: summary
//! counts plus per-module call details, written to a timestamped JSON file
//! and echoed to the console.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use serde::Serialize;

use crate::client::{CallRecord, Method};
use crate::common::{Error, Result};

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    /// Rendered as `"NN.NN%"`; 0.00% when no calls were made
    pub success_rate: String,
    pub test_time: String,
}

#[derive(Debug, Serialize)]
pub struct CallDetail {
    pub endpoint: String,
    pub method: Method,
    pub status_code: u16,
    pub success: bool,
    pub response_time: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub test_summary: Summary,
    /// Call details grouped by resource module (first path segment)
    pub test_results: BTreeMap<String, Vec<CallDetail>>,
}

impl Report {
    pub fn from_records(records: &[CallRecord]) -> Self {
        let total_tests = records.len();
        let passed_tests = records.iter().filter(|r| r.success).count();
        let failed_tests = total_tests - passed_tests;

        let success_rate = if total_tests > 0 {
            passed_tests as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };

        let mut test_results: BTreeMap<String, Vec<CallDetail>> = BTreeMap::new();
        for record in records {
            test_results
                .entry(record.module().to_string())
                .or_default()
                .push(CallDetail {
                    endpoint: record.endpoint.clone(),
                    method: record.method,
                    status_code: record.status_code,
                    success: record.success,
                    response_time: format!("{:.3}s", record.elapsed_seconds),
                    error_message: record.error_message.clone(),
                });
        }

        Self {
            test_summary: Summary {
                total_tests,
                passed_tests,
                failed_tests,
                success_rate: format!("{success_rate:.2}%"),
                test_time: Local::now().to_rfc3339(),
            },
            test_results,
        }
    }

    /// Write the report as pretty-printed JSON into `dir`, named
    /// `api_test_report_YYYYMMDD_HHMMSS.json`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let file_name = format!(
            "api_test_report_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(file_name);

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| Error::ReportWrite {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        Ok(path)
    }

    /// Print the human-readable summary block plus every failed call.
    pub fn print_summary(&self, records: &[CallRecord], report_path: Option<&Path>) {
        let summary = &self.test_summary;

        println!("\n{}", "=".repeat(60));
        println!("{}", "API smoke-test summary".bold());
        println!("{}", "=".repeat(60));
        println!("Total calls:  {}", summary.total_tests);
        println!(
            "Passed:       {}",
            summary.passed_tests.to_string().green()
        );
        println!("Failed:       {}", summary.failed_tests.to_string().red());
        println!("Success rate: {}", summary.success_rate);
        if let Some(path) = report_path {
            println!("Report file:  {}", path.display());
        }
        println!("{}", "=".repeat(60));

        if summary.failed_tests > 0 {
            println!("\n{}", "Failed calls:".red().bold());
            for record in records.iter().filter(|r| !r.success) {
                println!(
                    "  {} {} {} ({})",
                    "✗".red(),
                    record.method,
                    record.endpoint,
                    record.status_code
                );
                if let Some(error) = &record.error_message {
                    println!("    {}", error.dimmed());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(endpoint: &str, method: Method, status: u16) -> CallRecord {
        CallRecord {
            endpoint: endpoint.to_string(),
            method,
            status_code: status,
            success: (200..300).contains(&status),
            elapsed_seconds: 0.1234,
            error_message: if status >= 300 {
                Some("boom".to_string())
            } else {
                None
            },
            body: None,
        }
    }

    #[test]
    fn test_empty_run_has_zero_rate() {
        let report = Report::from_records(&[]);
        assert_eq!(report.test_summary.total_tests, 0);
        assert_eq!(report.test_summary.success_rate, "0.00%");
        assert!(report.test_results.is_empty());
    }

    #[test]
    fn test_counts_and_rate() {
        let records = vec![
            record("/members", Method::Get, 200),
            record("/members", Method::Post, 201),
            record("/orders", Method::Get, 500),
            record("/orders/1", Method::Put, 404),
        ];

        let report = Report::from_records(&records);
        assert_eq!(report.test_summary.total_tests, 4);
        assert_eq!(report.test_summary.passed_tests, 2);
        assert_eq!(report.test_summary.failed_tests, 2);
        assert_eq!(report.test_summary.success_rate, "50.00%");
    }

    #[test]
    fn test_grouping_by_module() {
        let records = vec![
            record("/login", Method::Post, 200),
            record("/members", Method::Get, 200),
            record("/members/42", Method::Delete, 200),
        ];

        let report = Report::from_records(&records);
        assert_eq!(report.test_results.len(), 2);
        assert_eq!(report.test_results["members"].len(), 2);
        assert_eq!(report.test_results["login"].len(), 1);
        assert_eq!(report.test_results["members"][0].response_time, "0.123s");
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = Report::from_records(&[record("/members", Method::Get, 200)]);

        let path = report.write_to(dir.path()).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("api_test_report_"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["test_summary"]["total_tests"], 1);
        assert_eq!(written["test_summary"]["success_rate"], "100.00%");
        assert_eq!(written["test_results"]["members"][0]["method"], "GET");
    }
}
