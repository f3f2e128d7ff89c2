use super::*;

const MIN_EXPECTED_CHUNKS: usize = 5;
const MIN_SUBSTRUCTURE_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IssueSeverity {
    Critical,
    Warning,
    Info,
}

impl IssueSeverity {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            IssueSeverity::Critical => "CRITICAL",
            IssueSeverity::Warning => "WARNING",
            IssueSeverity::Info => "INFO",
        }
    }
}

fn issue(severity: IssueSeverity, message: &str) -> String {
    format!("{}: {}", severity.as_str(), message)
}

/// Advisory parse-quality findings, tagged by severity. An empty parse skips
/// the chunk-count and sub-structure rules; the section and encoding rules
/// always run.
pub(super) fn validate_parse_quality(
    chunks: &[LegalChunk],
    statistics: &ParseStatistics,
    raw_text: &str,
) -> Vec<String> {
    let mut issues = Vec::<String>::new();

    if chunks.is_empty() {
        issues.push(issue(
            IssueSeverity::Critical,
            "No chunks parsed - file may be empty or unreadable",
        ));
    } else if chunks.len() < MIN_EXPECTED_CHUNKS {
        issues.push(issue(
            IssueSeverity::Warning,
            &format!(
                "Only {} chunks parsed - may indicate parsing issues",
                chunks.len()
            ),
        ));
    }

    if statistics.sections == 0 {
        issues.push(issue(
            IssueSeverity::Critical,
            "No sections found - parsing anchor may be incorrect",
        ));
    }

    if !chunks.is_empty() && statistics.sections > 0 {
        if statistics.subsections == 0 && statistics.clauses == 0 {
            issues.push(issue(
                IssueSeverity::Info,
                "No subsections or clauses found - may be a simple Act",
            ));
        }

        let ratio =
            (statistics.subsections + statistics.clauses) as f64 / statistics.sections as f64;
        if ratio < MIN_SUBSTRUCTURE_RATIO {
            issues.push(issue(
                IssueSeverity::Warning,
                &format!("Low sub-structure ratio ({ratio:.2}) - may have missed content"),
            ));
        }
    }

    if statistics.repeated_ids > 0 {
        issues.push(issue(
            IssueSeverity::Warning,
            &format!(
                "{} repeated unit identifiers disambiguated - table of contents or amendment text may have been parsed as units",
                statistics.repeated_ids
            ),
        ));
    }

    if !contains_devanagari(raw_text) {
        issues.push(issue(
            IssueSeverity::Critical,
            "No Devanagari text detected - wrong encoding or corrupted file",
        ));
    }

    issues
}

pub(super) fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|ch| ('\u{0900}'..='\u{097F}').contains(&ch))
}
