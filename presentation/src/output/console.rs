//! End-of-run console summary

use colored::Colorize;
use promptgrid_domain::ResultRecord;
use std::collections::BTreeMap;

/// Formats the run summary printed after the results file is written
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line per model: successes, failures, total; then grand totals.
    pub fn format_summary(records: &[ResultRecord]) -> String {
        let mut per_model: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for record in records {
            let entry = per_model.entry(record.model_name.as_str()).or_default();
            if record.is_error() {
                entry.1 += 1;
            } else {
                entry.0 += 1;
            }
        }

        let mut out = String::new();
        out.push_str(&format!("{}\n", "Run summary".bold()));
        for (model, (ok, failed)) in &per_model {
            let status = if *failed == 0 {
                format!("{}", "ok".green())
            } else {
                format!("{} failed", failed.to_string().red())
            };
            out.push_str(&format!(
                "  {:<24} {:>5} responses, {}\n",
                model,
                ok + failed,
                status
            ));
        }
        let failures: usize = per_model.values().map(|(_, f)| *f).sum();
        out.push_str(&format!(
            "  {:<24} {:>5} records, {} failures\n",
            "total".bold(),
            records.len(),
            failures
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_per_model() {
        colored::control::set_override(false);
        let records = vec![
            ResultRecord::success("m1", "p", "alpha", "r1"),
            ResultRecord::success("m2", "p", "alpha", "r2"),
            ResultRecord::failure("m1", "p", "beta", "boom"),
        ];
        let summary = ConsoleFormatter::format_summary(&records);
        assert!(summary.contains("alpha"));
        assert!(summary.contains("2 responses, ok"));
        assert!(summary.contains("beta"));
        assert!(summary.contains("1 failed"));
        assert!(summary.contains("3 records, 1 failures"));
    }

    #[test]
    fn test_empty_run_summary() {
        colored::control::set_override(false);
        let summary = ConsoleFormatter::format_summary(&[]);
        assert!(summary.contains("0 records, 0 failures"));
    }
}
