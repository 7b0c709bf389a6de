//! G-code move parsing and toolpath construction.
//!
//! The checker only cares about where the nozzle goes in the XY plane, so
//! parsing is deliberately narrow: `G0`/`G1` lines with `X`/`Y` words.
//! Everything else (arcs, Z moves, extrusion words, M-codes, comments) is
//! ignored for geometry, though unrecognized commands still parse as
//! [`MoveKind::Other`] so callers can see them in the stream.
//!
//! [`PathBuilder`] turns the move stream into a [`ToolPath`]:
//!
//! - It scans forward until both axes have a determined value; the waypoint
//!   sequence starts at that first fully-known position. The classifier
//!   never sees partially-unknown coordinates.
//! - Axis words are sticky: a move that names only `X` keeps the previous
//!   `Y`, G-code's modal behavior.
//! - Moves that do not change the position are coalesced; their source line
//!   numbers attach to the most recent segment so diagnostics can point at
//!   every contributing line. Zero-length segments are never recorded.
//! - Each segment carries the [`MoveKind`] of the move that created it,
//!   which is what exempts rapid traversals from violation display.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Kind of motion command, as a closed variant instead of string dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// `G0`: non-extruding rapid traversal.
    Rapid,
    /// `G1`: controlled (printing) move.
    Controlled,
    /// Any other command; carries no XY motion for the checker.
    Other,
}

/// A parsed G-code line, reduced to what the checker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GCodeMove {
    /// Command kind.
    pub kind: MoveKind,
    /// X coordinate (if the line names one).
    pub x: Option<f64>,
    /// Y coordinate (if the line names one).
    pub y: Option<f64>,
    /// Zero-based line number in the source file.
    pub line_number: usize,
}

impl GCodeMove {
    /// Parse one G-code line.
    ///
    /// Returns `None` for blank lines and pure comments. Command lines that
    /// are not `G0`/`G1` parse as [`MoveKind::Other`] with no coordinates.
    pub fn parse(line: &str, line_number: usize) -> Option<Self> {
        let line = line.trim();

        if line.is_empty() || line.starts_with(';') {
            return None;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next()?;

        let kind = match command {
            "G0" | "G00" => MoveKind::Rapid,
            "G1" | "G01" => MoveKind::Controlled,
            _ => {
                return Some(Self {
                    kind: MoveKind::Other,
                    x: None,
                    y: None,
                    line_number,
                });
            }
        };

        let mut mov = Self {
            kind,
            x: None,
            y: None,
            line_number,
        };

        for part in parts {
            if part.starts_with(';') {
                break; // rest of the line is a comment
            }
            if part.len() < 2 {
                continue;
            }
            let (word, value) = part.split_at(1);
            if let Ok(v) = value.parse::<f64>() {
                match word {
                    "X" => mov.x = Some(v),
                    "Y" => mov.y = Some(v),
                    _ => {}
                }
            }
        }

        Some(mov)
    }

    /// Whether this is a rapid traversal.
    pub fn is_rapid(&self) -> bool {
        self.kind == MoveKind::Rapid
    }
}

/// Parse every line of a G-code document into the moves the checker
/// understands, preserving source line numbers.
pub fn parse_moves(content: &str) -> Vec<GCodeMove> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| GCodeMove::parse(line, i))
        .collect()
}

/// Per-segment bookkeeping: the kind of the move that created the segment
/// and every source line that contributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTag {
    /// Kind of the move that created this segment's end waypoint.
    pub kind: MoveKind,
    /// Source line numbers attached to this segment, including the move
    /// that created it and any following lines that did not change the
    /// position.
    pub source_lines: Vec<usize>,
}

/// An ordered waypoint sequence with per-segment tags.
///
/// Invariants: `tags.len() == waypoints.len()`, consecutive waypoints are
/// never equal, and `tags[0]` belongs to the initial position, which has no
/// segment and is never classified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPath {
    /// Nozzle positions, recorded each time the position changes.
    pub waypoints: Vec<Point>,
    /// One tag per waypoint.
    pub tags: Vec<SegmentTag>,
}

impl ToolPath {
    /// Number of segments (one less than the waypoint count, or zero).
    pub fn segment_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Whether the path has no waypoints at all (no known position was ever
    /// established).
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Per-waypoint rapid flags, aligned with
    /// [`SegmentClassifier::classify_path_with_rapids`].
    ///
    /// [`SegmentClassifier::classify_path_with_rapids`]:
    /// crate::annulus::SegmentClassifier::classify_path_with_rapids
    pub fn rapid_flags(&self) -> Vec<bool> {
        self.tags
            .iter()
            .map(|tag| tag.kind == MoveKind::Rapid)
            .collect()
    }

    /// Source lines attached to the segment ending at `waypoint_index`.
    pub fn source_lines(&self, waypoint_index: usize) -> &[usize] {
        self.tags
            .get(waypoint_index)
            .map(|tag| tag.source_lines.as_slice())
            .unwrap_or(&[])
    }
}

/// Builds a [`ToolPath`] from a stream of moves.
#[derive(Debug, Default)]
pub struct PathBuilder {
    x: Option<f64>,
    y: Option<f64>,
    waypoints: Vec<Point>,
    tags: Vec<SegmentTag>,
}

impl PathBuilder {
    /// Create an empty builder with both axes unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one move into the builder.
    pub fn push(&mut self, mov: &GCodeMove) {
        if mov.kind == MoveKind::Other {
            return;
        }

        if let Some(x) = mov.x {
            self.x = Some(x);
        }
        if let Some(y) = mov.y {
            self.y = Some(y);
        }

        // Until both axes are known there is no position to record.
        let (Some(x), Some(y)) = (self.x, self.y) else {
            return;
        };
        let cur = Point::new(x, y);

        if self.waypoints.is_empty() {
            // First fully-known position. The establishing line starts the
            // path but belongs to no segment.
            self.waypoints.push(cur);
            self.tags.push(SegmentTag {
                kind: mov.kind,
                source_lines: Vec::new(),
            });
            return;
        }

        if self.waypoints.last() != Some(&cur) {
            self.waypoints.push(cur);
            self.tags.push(SegmentTag {
                kind: mov.kind,
                source_lines: Vec::new(),
            });
        }
        if let Some(tag) = self.tags.last_mut() {
            tag.source_lines.push(mov.line_number);
        }
    }

    /// Consume the builder and return the accumulated path.
    pub fn finish(self) -> ToolPath {
        ToolPath {
            waypoints: self.waypoints,
            tags: self.tags,
        }
    }

    /// Build a path from a move iterator in one call.
    pub fn from_moves<'a, I>(moves: I) -> ToolPath
    where
        I: IntoIterator<Item = &'a GCodeMove>,
    {
        let mut builder = Self::new();
        for mov in moves {
            builder.push(mov);
        }
        builder.finish()
    }
}

/// Parse a G-code document and build its toolpath in one call.
pub fn build_path(content: &str) -> ToolPath {
    let moves = parse_moves(content);
    PathBuilder::from_moves(&moves)
}
