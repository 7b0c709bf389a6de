//! Violation reporting for classified toolpaths.
//!
//! Consumes the classifier's output together with the toolpath's source-line
//! bookkeeping and produces human-readable diagnostics: a one-line summary,
//! a verbose listing that echoes the offending G-code lines, and a JSON
//! export for tooling.
//!
//! Issues are numbered with all inner violations first, then all outer
//! violations, in segment order within each group. Rapid segments keep
//! their geometric issues in this list; the rapid exemption only affects
//! the combined per-segment status used for rendering.

use crate::annulus::{SegmentClassification, SegmentStatus};
use crate::gcode::ToolPath;
use serde::Serialize;
use std::fmt::Write;

/// Which bound a violation crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// Closest approach dipped inside the inner radius.
    Inner,
    /// An endpoint lay beyond the outer radius.
    Outer,
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Sequential issue number across the whole report.
    pub number: usize,
    /// Which bound was crossed.
    pub kind: IssueKind,
    /// Index of the violating segment's end waypoint.
    pub segment_index: usize,
    /// The squared distance that breached the threshold.
    pub distance_sq: f64,
    /// Source lines of the segment, zero-based.
    pub source_lines: Vec<usize>,
}

impl Issue {
    /// Real (square-rooted) distance from the center for display.
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Classification results plus the diagnostics derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// The toolpath that was checked.
    pub path: ToolPath,
    /// One classification per segment, in segment order.
    pub classifications: Vec<SegmentClassification>,
    /// Violations, inner issues first, then outer.
    pub issues: Vec<Issue>,
}

impl CheckReport {
    /// Build a report from a path and its classifications.
    pub fn new(path: ToolPath, classifications: Vec<SegmentClassification>) -> Self {
        let mut issues = Vec::new();

        for c in classifications.iter().filter(|c| c.inner_violation) {
            issues.push(Issue {
                number: issues.len(),
                kind: IssueKind::Inner,
                segment_index: c.segment_index,
                distance_sq: c.inner_distance_sq,
                source_lines: path.source_lines(c.segment_index).to_vec(),
            });
        }
        for c in classifications.iter().filter(|c| c.outer_violation) {
            issues.push(Issue {
                number: issues.len(),
                kind: IssueKind::Outer,
                segment_index: c.segment_index,
                distance_sq: c.outer_distance_sq,
                source_lines: path.source_lines(c.segment_index).to_vec(),
            });
        }

        Self {
            path,
            classifications,
            issues,
        }
    }

    /// Number of violations found.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Whether any segment violated either bound.
    pub fn has_violations(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Combined display status for every segment, in segment order.
    pub fn statuses(&self) -> Vec<SegmentStatus> {
        self.classifications.iter().map(|c| c.status()).collect()
    }

    /// One-paragraph summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        writeln!(
            &mut s,
            "checked {} segment(s) across {} waypoint(s)",
            self.classifications.len(),
            self.path.waypoints.len()
        )
        .unwrap();
        writeln!(&mut s, "number of issues: {}", self.issues.len()).unwrap();
        s
    }

    /// Verbose listing of every issue, echoing the offending G-code lines
    /// from `lines` (the document split into lines, as in
    /// [`str::lines`]). Line numbers print one-based, as editors show them.
    pub fn verbose(&self, lines: &[&str]) -> String {
        let mut s = self.summary();

        for issue in &self.issues {
            let kind = match issue.kind {
                IssueKind::Inner => "inside",
                IssueKind::Outer => "outside",
            };
            writeln!(&mut s, "Issue {} ({})", issue.number, kind).unwrap();
            writeln!(&mut s, "\tDistance from origin: {}", issue.distance()).unwrap();
            for &line_index in &issue.source_lines {
                let text = lines.get(line_index).copied().unwrap_or("");
                writeln!(&mut s, "\tl{}:\t{}", line_index + 1, text).unwrap();
            }
        }

        s
    }

    /// Serialize the report to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annulus::{Annulus, SegmentClassifier};
    use crate::gcode::build_path;
    use crate::geometry::Point;

    fn report_for(gcode: &str, inner: f64, outer: f64) -> CheckReport {
        let path = build_path(gcode);
        let classifier =
            SegmentClassifier::new(Annulus::new(Point::zero(), inner, outer).unwrap()).unwrap();
        let classifications =
            classifier.classify_path_with_rapids(&path.waypoints, &path.rapid_flags());
        CheckReport::new(path, classifications)
    }

    #[test]
    fn test_clean_path_has_no_issues() {
        let report = report_for("G1 X2 Y0\nG1 X0 Y2\n", 1.0, 5.0);
        assert!(!report.has_violations());
        assert!(report.summary().contains("number of issues: 0"));
    }

    #[test]
    fn test_inner_issue_reported_with_lines() {
        let gcode = "G1 X1 Y0\nG1 X-1 Y0\n";
        let report = report_for(gcode, 0.5, 10.0);
        assert_eq!(report.issue_count(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.kind, IssueKind::Inner);
        assert_eq!(issue.segment_index, 1);
        assert_eq!(issue.source_lines, vec![1]);
        assert!((issue.distance() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_inner_issues_numbered_before_outer() {
        // Segment 1 violates outer; segment 2 violates inner and (through
        // its far endpoint) outer. The inner issue still gets number 0.
        let gcode = "G1 X2 Y0\nG1 X6 Y0\nG1 X0.1 Y0\n";
        let report = report_for(gcode, 1.0, 5.0);
        assert_eq!(report.issue_count(), 3);
        assert_eq!(report.issues[0].kind, IssueKind::Inner);
        assert_eq!(report.issues[0].segment_index, 2);
        assert_eq!(report.issues[1].kind, IssueKind::Outer);
        assert_eq!(report.issues[1].segment_index, 1);
        assert_eq!(report.issues[2].kind, IssueKind::Outer);
        assert_eq!(report.issues[2].segment_index, 2);
        for (i, issue) in report.issues.iter().enumerate() {
            assert_eq!(issue.number, i);
        }
    }

    #[test]
    fn test_both_violations_yield_two_issues() {
        let gcode = "G1 X-3 Y0\nG1 X3 Y0\n";
        let report = report_for(gcode, 1.0, 2.0);
        assert_eq!(report.issue_count(), 2);
        assert_eq!(report.statuses(), vec![crate::annulus::SegmentStatus::Both]);
    }

    #[test]
    fn test_rapid_segment_keeps_issue_but_not_status() {
        let gcode = "G1 X0 Y0\nG0 X9 Y0\n";
        let report = report_for(gcode, 0.0, 5.0);
        // The rapid segment's outer violation is still counted...
        assert_eq!(report.issue_count(), 1);
        // ...but its display status is rapid.
        assert_eq!(
            report.statuses(),
            vec![crate::annulus::SegmentStatus::Rapid]
        );
    }

    #[test]
    fn test_verbose_echoes_gcode_lines() {
        let gcode = "G1 X1 Y0\nG1 X-1 Y0 ; crosses center\n";
        let report = report_for(gcode, 0.5, 10.0);
        let lines: Vec<&str> = gcode.lines().collect();
        let verbose = report.verbose(&lines);
        assert!(verbose.contains("Issue 0 (inside)"));
        assert!(verbose.contains("Distance from origin: 0"));
        assert!(verbose.contains("l2:\tG1 X-1 Y0 ; crosses center"));
    }

    #[test]
    fn test_json_export_round_trips_as_value() {
        let report = report_for("G1 X2 Y0\nG1 X6 Y0\n", 1.0, 5.0);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["issues"][0]["kind"], "Outer");
        assert_eq!(value["issues"][0]["segment_index"], 1);
    }
}
