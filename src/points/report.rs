//! Summary of a validation run and its renderings
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use crate::points::core::{Bounds, Issue, display_id};
use crate::points::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
pub struct Report {
    pub source: PathBuf,
    pub sha256: String,
    pub checked_at: DateTime<Utc>,
    pub records: usize,
    pub issues: Vec<Issue>,
    #[builder(default)]
    pub bounds: Option<Bounds>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    errors: usize,
    passed: bool,
}

impl Report {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::default()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Console rendering. `quiet` drops the per-issue warning lines.
    pub fn write_text<W: Write>(&self, mut out: W, quiet: bool) -> Result<()> {
        writeln!(out, "Loaded {} points.", self.records)?;
        if !quiet {
            for issue in &self.issues {
                writeln!(out, "warning: {issue}")?;
            }
        }
        writeln!(out)?;
        if self.passed() {
            writeln!(
                out,
                "SUCCESS: data integrity check passed, {} unique points validated.",
                self.records
            )?;
            if let Some(bounds) = &self.bounds {
                writeln!(out, "Bounds: {bounds}")?;
            }
        } else {
            writeln!(out, "FAILED: found {} errors in the dataset.", self.error_count())?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut out: W) -> Result<()> {
        let view = JsonReport {
            report: self,
            errors: self.error_count(),
            passed: self.passed(),
        };
        serde_json::to_writer_pretty(&mut out, &view).map_err(std::io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }

    /// One row per issue: `index,kind,field,id`
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["index", "kind", "field", "id"])?;
        for issue in &self.issues {
            let field = issue.kind.field().map(|f| f.as_str()).unwrap_or_default();
            let id = issue.kind.id().map(display_id).unwrap_or_default();
            writer.write_record([
                issue.index.to_string().as_str(),
                issue.kind.name(),
                field,
                id.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::core::{IssueKind, RequiredField};
    use serde_json::json;

    fn report(issues: Vec<Issue>) -> Report {
        Report::builder()
            .source(PathBuf::from("data/campus_points.json"))
            .sha256("00".repeat(32))
            .checked_at(Utc::now())
            .records(2)
            .issues(issues)
            .bounds(Some(Bounds::from_point([1.0, 2.0, 3.0])))
            .build()
            .unwrap()
    }

    fn failing() -> Report {
        report(vec![
            Issue::new(1, IssueKind::DuplicateId { id: json!(1) }),
            Issue::new(1, IssueKind::NonNumericCoordinate { field: RequiredField::Y }),
        ])
    }

    fn render_text(report: &Report, quiet: bool) -> String {
        let mut out = Vec::new();
        report.write_text(&mut out, quiet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_success() {
        let text = render_text(&report(vec![]), false);
        assert_eq!(
            text,
            "Loaded 2 points.\n\n\
             SUCCESS: data integrity check passed, 2 unique points validated.\n\
             Bounds: x [1, 1], y [2, 2], z [3, 3]\n"
        );
    }

    #[test]
    fn text_failure_lists_issues() {
        let text = render_text(&failing(), false);
        assert_eq!(
            text,
            "Loaded 2 points.\n\
             warning: index 1: duplicate id 1\n\
             warning: index 1: 'y' must be a number\n\n\
             FAILED: found 2 errors in the dataset.\n"
        );
    }

    #[test]
    fn quiet_text_keeps_summary_only() {
        let text = render_text(&failing(), true);
        assert!(!text.contains("warning:"));
        assert!(text.ends_with("FAILED: found 2 errors in the dataset.\n"));
    }

    #[test]
    fn json_carries_counts_and_issues() {
        let mut out = Vec::new();
        failing().write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["errors"], 2);
        assert_eq!(value["passed"], false);
        assert_eq!(value["records"], 2);
        assert_eq!(value["source"], "data/campus_points.json");
        assert_eq!(value["issues"][0], json!({"index": 1, "kind": "duplicate_id", "id": 1}));
        assert_eq!(
            value["issues"][1],
            json!({"index": 1, "kind": "non_numeric_coordinate", "field": "y"})
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_write_failure_is_an_io_error() {
        let err = failing().write_json(ClosedPipe).unwrap_err();
        assert!(matches!(err, crate::points::errors::Error::Io(_)));
        assert!(!err.to_string().contains("invalid JSON format"));
    }

    #[test]
    fn csv_rows() {
        let mut out = Vec::new();
        failing().write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "index,kind,field,id\n1,duplicate_id,,1\n1,non_numeric_coordinate,y,\n"
        );
    }

    #[test]
    fn builder_requires_issues() {
        let err = Report::builder()
            .source(PathBuf::from("p.json"))
            .sha256(String::new())
            .checked_at(Utc::now())
            .records(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("issues"));
    }
}
