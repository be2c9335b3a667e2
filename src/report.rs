//! Reports returned by [`Scanner`](crate::Scanner).
//!
//! Both report types are `Serialize` for `--json` output, and their `Display`
//! impls are what the CLI prints.

use std::fmt;

use ingest::DocumentFormat;
use matcher::ComparisonResult;
use serde::Serialize;

/// Scan verdict for a flagged candidate.
pub const VERDICT_PLAGIARIZED: &str = "Plagiarism detected";
/// Scan verdict for a candidate under the threshold.
pub const VERDICT_CLEAN: &str = "No plagiarism detected";

/// What a report says about one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub name: String,
    pub format: DocumentFormat,
    pub token_count: usize,
    pub canonical_sha256: String,
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub left: DocumentSummary,
    pub right: DocumentSummary,
    pub result: ComparisonResult,
}

impl PairReport {
    /// Similarity rendered with two decimals, e.g. `"87.50%"`.
    pub fn similarity_rate(&self) -> String {
        format_rate(&self.result)
    }
}

impl fmt::Display for PairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Similarity: {}", self.similarity_rate())?;
        if self.result.is_plagiarized {
            write!(f, "Plagiarism detected.")
        } else {
            write!(f, "No significant plagiarism detected.")
        }
    }
}

/// One successfully compared candidate in a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRow {
    /// 1-based position among the successful rows.
    pub no: usize,
    pub filename: String,
    pub similarity_rate: String,
    pub verdict: &'static str,
    pub result: ComparisonResult,
}

impl ScanRow {
    pub(crate) fn new(no: usize, filename: String, result: ComparisonResult) -> Self {
        Self {
            no,
            filename,
            similarity_rate: format_rate(&result),
            verdict: if result.is_plagiarized {
                VERDICT_PLAGIARIZED
            } else {
                VERDICT_CLEAN
            },
            result,
        }
    }
}

/// A candidate that could not be read, extracted or compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: String,
}

/// One base document compared against many candidates.
///
/// Rows keep the order candidates were given in. Failed candidates do not
/// consume a row number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub base: DocumentSummary,
    pub rows: Vec<ScanRow>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// True when no candidate produced a row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose verdict is plagiarism.
    pub fn flagged(&self) -> impl Iterator<Item = &ScanRow> {
        self.rows.iter().filter(|row| row.result.is_plagiarized)
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            write!(f, "No valid files uploaded.")?;
        } else {
            let no_w = self
                .rows
                .iter()
                .map(|r| r.no.to_string().len())
                .fold("No.".len(), usize::max);
            let name_w = self
                .rows
                .iter()
                .map(|r| r.filename.chars().count())
                .fold("Filename".len(), usize::max);
            let rate_w = self
                .rows
                .iter()
                .map(|r| r.similarity_rate.len())
                .fold("Similarity Rate".len(), usize::max);

            write!(
                f,
                "{:<no_w$}  {:<name_w$}  {:<rate_w$}  Verdict",
                "No.", "Filename", "Similarity Rate"
            )?;
            for row in &self.rows {
                write!(
                    f,
                    "\n{:>no_w$}  {:<name_w$}  {:>rate_w$}  {}",
                    row.no, row.filename, row.similarity_rate, row.verdict
                )?;
            }
        }

        for skipped in &self.skipped {
            write!(f, "\nSkipped {}: {}", skipped.filename, skipped.reason)?;
        }
        Ok(())
    }
}

fn format_rate(result: &ComparisonResult) -> String {
    format!("{:.2}%", result.percentage())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str) -> DocumentSummary {
        DocumentSummary {
            name: name.into(),
            format: DocumentFormat::Txt,
            token_count: 3,
            canonical_sha256: "00".repeat(32),
        }
    }

    fn result(matching: usize, compared: usize) -> ComparisonResult {
        ComparisonResult::from_counts(matching, compared, 0.8)
    }

    #[test]
    fn pair_report_display() {
        let report = PairReport {
            left: summary("a.txt"),
            right: summary("b.txt"),
            result: result(7, 8),
        };
        assert_eq!(report.similarity_rate(), "87.50%");
        assert_eq!(report.to_string(), "Similarity: 87.50%\nPlagiarism detected.");

        let report = PairReport {
            result: result(1, 3),
            ..report
        };
        assert_eq!(
            report.to_string(),
            "Similarity: 33.33%\nNo significant plagiarism detected."
        );
    }

    #[test]
    fn scan_row_verdicts() {
        let row = ScanRow::new(1, "copy.txt".into(), result(10, 10));
        assert_eq!(row.similarity_rate, "100.00%");
        assert_eq!(row.verdict, VERDICT_PLAGIARIZED);

        let row = ScanRow::new(2, "own.txt".into(), result(0, 0));
        assert_eq!(row.similarity_rate, "0.00%");
        assert_eq!(row.verdict, VERDICT_CLEAN);
    }

    #[test]
    fn scan_report_table() {
        let report = ScanReport {
            base: summary("base.txt"),
            rows: vec![
                ScanRow::new(1, "copy.txt".into(), result(10, 10)),
                ScanRow::new(2, "own.txt".into(), result(1, 4)),
            ],
            skipped: vec![SkippedFile {
                filename: "notes.odt".into(),
                reason: "unsupported".into(),
            }],
        };

        let expected = [
            "No.  Filename  Similarity Rate  Verdict",
            "  1  copy.txt          100.00%  Plagiarism detected",
            "  2  own.txt            25.00%  No plagiarism detected",
            "Skipped notes.odt: unsupported",
        ]
        .join("\n");
        assert_eq!(report.to_string(), expected);
        assert_eq!(report.flagged().count(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn empty_scan_report() {
        let report = ScanReport {
            base: summary("base.txt"),
            rows: Vec::new(),
            skipped: Vec::new(),
        };
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No valid files uploaded.");
    }

    #[test]
    fn scan_report_serializes() {
        let report = ScanReport {
            base: summary("base.txt"),
            rows: vec![ScanRow::new(1, "copy.txt".into(), result(4, 5))],
            skipped: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["base"]["format"], "txt");
        assert_eq!(json["rows"][0]["no"], 1);
        assert_eq!(json["rows"][0]["similarity_rate"], "80.00%");
        assert_eq!(json["rows"][0]["verdict"], VERDICT_PLAGIARIZED);
        assert_eq!(json["rows"][0]["result"]["matching_windows"], 4);
    }
}
