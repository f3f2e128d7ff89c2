use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{ParseRunManifest, ParseStatus, ParsingReportEntry};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.output_dir.join("manifests").join("parse_run.json"));
    let report_path = args.output_dir.join(&args.report_file);

    info!(output_dir = %args.output_dir.display(), "status requested");

    if manifest_path.exists() {
        let manifest: ParseRunManifest = read_json(&manifest_path)?;
        info!(
            run_id = %manifest.run_id,
            status = %manifest.status,
            started_at = %manifest.started_at,
            updated_at = %manifest.updated_at,
            command = %manifest.command,
            file_count = manifest.counts.file_count,
            succeeded = manifest.counts.succeeded,
            failed = manifest.counts.failed,
            files_with_issues = manifest.counts.files_with_issues,
            acts = manifest.counts.acts_total,
            chunks = manifest.counts.chunks_total,
            "loaded parse run manifest"
        );
    } else {
        warn!(path = %manifest_path.display(), "parse run manifest missing");
    }

    if report_path.exists() {
        let report: Vec<ParsingReportEntry> = read_json(&report_path)?;
        let summary = summarize_report(&report);
        info!(
            files = report.len(),
            succeeded = summary.succeeded,
            failed = summary.failed,
            critical = summary.critical,
            chunks = summary.chunks,
            "loaded parsing report"
        );

        for entry in report
            .iter()
            .filter(|entry| entry.status == ParseStatus::Failed)
        {
            warn!(
                file = %entry.decoded_name,
                error = %entry.error.as_deref().unwrap_or_default(),
                "failed act"
            );
        }
    } else {
        warn!(path = %report_path.display(), "parsing report missing");
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReportSummary {
    succeeded: usize,
    failed: usize,
    critical: usize,
    chunks: usize,
}

fn summarize_report(report: &[ParsingReportEntry]) -> ReportSummary {
    let mut summary = ReportSummary::default();
    for entry in report {
        match entry.status {
            ParseStatus::Success => summary.succeeded += 1,
            ParseStatus::Failed => summary.failed += 1,
        }
        summary.chunks += entry.chunks.unwrap_or(0);
        let has_critical = entry
            .issues
            .as_ref()
            .is_some_and(|issues| issues.iter().any(|issue| issue.starts_with("CRITICAL")));
        if has_critical {
            summary.critical += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: ParseStatus, chunks: Option<usize>, issues: &[&str]) -> ParsingReportEntry {
        ParsingReportEntry {
            file: "act.txt".to_string(),
            decoded_name: "act.txt".to_string(),
            status,
            source_sha256: None,
            source_encoding: None,
            chunks,
            statistics: None,
            issues: Some(issues.iter().map(|issue| issue.to_string()).collect()),
            error: None,
        }
    }

    #[test]
    fn summarize_report_counts_statuses_and_critical_issues() {
        let report = vec![
            entry(ParseStatus::Success, Some(12), &["INFO: simple act"]),
            entry(ParseStatus::Success, Some(0), &["CRITICAL: No chunks parsed"]),
            entry(ParseStatus::Failed, None, &[]),
        ];

        let summary = summarize_report(&report);
        assert_eq!(
            summary,
            ReportSummary {
                succeeded: 2,
                failed: 1,
                critical: 1,
                chunks: 12,
            }
        );
    }
}
