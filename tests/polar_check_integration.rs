//! End-to-end polar check pipeline tests.
//!
//! These tests run whole G-code documents through parsing, path building,
//! classification, and reporting, and verify the combined per-segment
//! statuses and diagnostics against known geometry.

use polar_check::{
    check_gcode, Annulus, IssueKind, PathPlot, Point, SegmentClassifier, SegmentStatus,
};

#[test]
fn test_square_path_inside_zone_is_clean() {
    let gcode = r#"
; 4mm square centered on the origin, safely inside r=1, R=5
G1 X2 Y2
G1 X-2 Y2
G1 X-2 Y-2
G1 X2 Y-2
G1 X2 Y2
"#;
    let annulus = Annulus::new(Point::zero(), 1.0, 5.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    assert_eq!(report.path.waypoints.len(), 5);
    assert_eq!(report.issue_count(), 0);
    assert!(report
        .statuses()
        .iter()
        .all(|&s| s == SegmentStatus::Clean));
}

#[test]
fn test_diameter_crossing_flags_both_violations() {
    // One segment from (-3,0) to (3,0) with r=1, R=2: passes through the
    // center and both endpoints lie outside.
    let gcode = "G1 X-3 Y0\nG1 X3 Y0\n";
    let annulus = Annulus::new(Point::zero(), 1.0, 2.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    assert_eq!(report.statuses(), vec![SegmentStatus::Both]);
    assert_eq!(report.issue_count(), 2);
    assert_eq!(report.issues[0].kind, IssueKind::Inner);
    assert_eq!(report.issues[1].kind, IssueKind::Outer);
    assert!((report.issues[0].distance() - 0.0).abs() < 1e-12);
    assert!((report.issues[1].distance() - 3.0).abs() < 1e-12);
}

#[test]
fn test_rapid_traversal_is_exempt_from_display_status() {
    let gcode = r#"
G1 X2 Y0
G0 X0.1 Y0 ; rapid hop straight across the exclusion zone
G1 X-2 Y0.2
"#;
    let annulus = Annulus::new(Point::zero(), 1.0, 5.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    let statuses = report.statuses();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0], SegmentStatus::Rapid);
    // The controlled segment that follows still gets flagged on its own.
    assert_eq!(statuses[1], SegmentStatus::Inner);
    // The rapid segment's geometric issues remain in the issue list.
    assert!(report
        .issues
        .iter()
        .any(|issue| issue.segment_index == 1 && issue.kind == IssueKind::Inner));
}

#[test]
fn test_preamble_without_position_is_skipped() {
    let gcode = r#"
M104 S210
M140 S60
G28 ; home
G1 F1200
G1 X10
G1 Y0
G1 X10 Y8
"#;
    let annulus = Annulus::new(Point::zero(), 1.0, 50.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    // The path starts at the first fully-known position (10, 0).
    assert_eq!(report.path.waypoints[0], Point::new(10.0, 0.0));
    assert_eq!(report.path.waypoints.len(), 2);
    assert_eq!(report.issue_count(), 0);
}

#[test]
fn test_verbose_report_points_at_source_lines() {
    let gcode = "G1 X2 Y0\nG1 X8 Y0\nG1 F900\n";
    let annulus = Annulus::new(Point::zero(), 0.0, 5.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    assert_eq!(report.issue_count(), 1);
    // The violating move is on line 2 (one-based); the stationary F-only
    // line after it attaches to the same segment.
    assert_eq!(report.issues[0].source_lines, vec![1, 2]);

    let lines: Vec<&str> = gcode.lines().collect();
    let verbose = report.verbose(&lines);
    assert!(verbose.contains("Issue 0 (outside)"));
    assert!(verbose.contains("l2:\tG1 X8 Y0"));
    assert!(verbose.contains("l3:\tG1 F900"));
}

#[test]
fn test_plot_renders_classified_path() {
    let gcode = "G1 X2 Y0\nG0 X2 Y2\nG1 X-0.1 Y0\nG1 X6 Y0\n";
    let annulus = Annulus::new(Point::zero(), 1.0, 5.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    let svg = PathPlot::new(annulus, report.path.waypoints.clone(), report.statuses())
        .with_title("Nozzle 2D Path")
        .render();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("Nozzle 2D Path"));
    // One round-capped <line> element per segment (legend lines are not
    // round-capped).
    assert_eq!(
        svg.matches(r#"stroke-linecap="round""#).count(),
        report.path.segment_count()
    );
}

#[test]
fn test_classifier_matches_pipeline_output() {
    // The one-shot entry point must agree with driving the classifier by
    // hand on the same waypoints.
    let gcode = "G1 X1 Y1\nG1 X-1 Y1\nG1 X-1 Y-1\n";
    let annulus = Annulus::new(Point::new(0.5, 0.0), 0.75, 3.0).unwrap();

    let report = check_gcode(gcode, annulus).unwrap();

    let classifier = SegmentClassifier::new(annulus).unwrap();
    let manual = classifier.classify_path(&report.path.waypoints);

    assert_eq!(report.classifications, manual);
}

#[test]
fn test_json_export_contains_full_pipeline_output() {
    let gcode = "G1 X2 Y0\nG1 X6 Y0\n";
    let annulus = Annulus::new(Point::zero(), 1.0, 5.0).unwrap();
    let report = check_gcode(gcode, annulus).unwrap();

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["path"]["waypoints"].as_array().unwrap().len(), 2);
    assert_eq!(value["classifications"].as_array().unwrap().len(), 1);
    assert_eq!(value["issues"].as_array().unwrap().len(), 1);
}
