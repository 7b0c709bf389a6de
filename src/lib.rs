//! Annulus-bounds checker for polar printer G-code toolpaths.
//!
//! A polar printer's nozzle must stay within a "thick disk" around the
//! machine origin: at least `r` and at most `R` away from a center `O`.
//! This crate takes a G-code document, reduces it to the 2D path the nozzle
//! actually travels, and classifies every straight segment of that path
//! against the permitted zone.
//!
//! The pipeline is strictly linear: commands → waypoints → classifications
//! → report. Each stage owns its output and feeds the next; nothing feeds
//! back.
//!
//! - [`gcode`] parses move lines and builds the waypoint sequence,
//!   coalescing stationary commands and tagging rapid traversals.
//! - [`annulus`] holds the core classifier: closest-approach projection for
//!   the inner bound, endpoint maxima for the outer bound.
//! - [`report`] turns classifications into diagnostics.
//! - [`plot`] renders the colored path as SVG.
//!
//! # Example
//!
//! ```
//! use polar_check::{check_gcode, Annulus, Point, SegmentStatus};
//!
//! let gcode = "G1 X1 Y0\nG1 X-1 Y0\n";
//! let annulus = Annulus::new(Point::zero(), 0.5, 10.0).unwrap();
//! let report = check_gcode(gcode, annulus).unwrap();
//!
//! assert_eq!(report.issue_count(), 1);
//! assert_eq!(report.statuses(), vec![SegmentStatus::Inner]);
//! ```

pub mod annulus;
pub mod gcode;
pub mod geometry;
pub mod plot;
pub mod report;

pub use annulus::{
    Annulus, AnnulusError, SegmentClassification, SegmentClassifier, SegmentStatus,
};
pub use gcode::{GCodeMove, MoveKind, PathBuilder, ToolPath};
pub use geometry::Point;
pub use plot::{PathPlot, PlotConfig};
pub use report::{CheckReport, Issue, IssueKind};

use std::fs;
use std::path::Path;

/// Error type for the one-shot check entry points.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Annulus(#[from] AnnulusError),
}

/// Check a G-code document against an annulus in one call.
///
/// Parses the document, builds the toolpath, classifies every segment, and
/// returns the report. Invalid annulus parameters are rejected before any
/// parsing happens; an empty or motion-free document yields a report with
/// no segments.
pub fn check_gcode(content: &str, annulus: Annulus) -> Result<CheckReport, AnnulusError> {
    let classifier = SegmentClassifier::new(annulus)?;
    let path = gcode::build_path(content);
    let classifications = classifier.classify_path_with_rapids(&path.waypoints, &path.rapid_flags());
    Ok(CheckReport::new(path, classifications))
}

/// Check a G-code file against an annulus.
pub fn check_gcode_file<P: AsRef<Path>>(path: P, annulus: Annulus) -> Result<CheckReport, CheckError> {
    let content = fs::read_to_string(path)?;
    Ok(check_gcode(&content, annulus)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_gcode_clean() {
        let report = check_gcode("G1 X2 Y0\nG1 X0 Y2\n", Annulus::default()).unwrap();
        assert_eq!(report.issue_count(), 0);
        assert_eq!(report.statuses(), vec![SegmentStatus::Clean]);
    }

    #[test]
    fn test_check_gcode_rejects_bad_annulus_before_parsing() {
        let annulus = Annulus {
            center: Point::zero(),
            inner_radius: 5.0,
            outer_radius: 1.0,
        };
        let err = check_gcode("not even gcode", annulus).unwrap_err();
        assert!(matches!(err, AnnulusError::InvertedRadii { .. }));
    }

    #[test]
    fn test_check_gcode_empty_document() {
        let report = check_gcode("", Annulus::default()).unwrap();
        assert!(report.path.is_empty());
        assert!(report.classifications.is_empty());
    }
}
