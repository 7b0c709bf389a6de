//! Annulus ("thick disk") classification of toolpath segments.
//!
//! A polar printer's nozzle must stay inside a permitted zone bounded by an
//! inner radius `r` and an outer radius `R` around a center `O`. This module
//! classifies each straight segment of a toolpath against that zone:
//!
//! - **Inner test**: the minimum distance from `O` to the segment, computed
//!   by clamped projection, because the closest approach can occur strictly
//!   between the endpoints.
//! - **Outer test**: the maximum of the two endpoint distances from `O`.
//!   Squared distance along a segment is a convex function of the
//!   interpolation parameter, so its maximum over the closed interval is
//!   always attained at an endpoint; checking the interior is unnecessary.
//!
//! All comparisons happen in squared distances against squared radii, which
//! avoids square roots and preserves ordering.
//!
//! # NaN handling
//!
//! Non-finite coordinates are an upstream data error. The classifier does
//! not sanitize them: under IEEE comparison semantics `NaN < r²` and
//! `NaN > R²` are both false, so NaN-valued distances read as no violation.
//! This is the adopted behavior, not an accident. Note that `f64::max`
//! ignores NaN, so a segment with one NaN endpoint can still flag an outer
//! violation through its finite endpoint.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Error type for invalid annulus parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnnulusError {
    #[error("inner radius must be non-negative, got {0}")]
    NegativeInnerRadius(f64),

    #[error("inner radius {inner} exceeds outer radius {outer}")]
    InvertedRadii { inner: f64, outer: f64 },
}

/// The permitted zone: all points whose distance `d` from `center`
/// satisfies `inner_radius <= d <= outer_radius`.
///
/// `inner_radius` may be 0 (a full disk) and `outer_radius` may be
/// `f64::INFINITY` (no outer bound); both are the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    /// Center of the permitted zone.
    pub center: Point,
    /// Inner (exclusion) radius, `>= 0`.
    pub inner_radius: f64,
    /// Outer radius, `>= inner_radius`.
    pub outer_radius: f64,
}

impl Default for Annulus {
    fn default() -> Self {
        Self {
            center: Point::zero(),
            inner_radius: 0.0,
            outer_radius: f64::INFINITY,
        }
    }
}

impl Annulus {
    /// Create an annulus, validating the radii.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Result<Self, AnnulusError> {
        let annulus = Self {
            center,
            inner_radius,
            outer_radius,
        };
        annulus.validate()?;
        Ok(annulus)
    }

    /// Check the parameter invariants: `0 <= inner_radius <= outer_radius`.
    pub fn validate(&self) -> Result<(), AnnulusError> {
        if self.inner_radius < 0.0 {
            return Err(AnnulusError::NegativeInnerRadius(self.inner_radius));
        }
        if self.inner_radius > self.outer_radius {
            return Err(AnnulusError::InvertedRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        Ok(())
    }

    /// Whether a single point lies inside the permitted zone (bounds included).
    pub fn contains(&self, p: &Point) -> bool {
        let d2 = self.center.distance_squared(p);
        d2 >= self.inner_radius * self.inner_radius && d2 <= self.outer_radius * self.outer_radius
    }
}

/// Combined per-segment status for rendering and reporting.
///
/// The rapid tag takes precedence over the geometric outcome; otherwise the
/// two violation flags combine independently, with both-set a distinct state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentStatus {
    /// Non-extruding rapid traversal; exempt from violation display.
    Rapid,
    /// Stays inside the permitted zone.
    Clean,
    /// Dips inside the inner exclusion radius.
    Inner,
    /// An endpoint lies beyond the outer radius.
    Outer,
    /// Both inner and outer violations on the same segment.
    Both,
}

/// Classification record for one toolpath segment.
///
/// Distances are always computed; the flags indicate whether the
/// corresponding threshold was breached. Records are produced once and
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentClassification {
    /// Index of the segment's end waypoint (segment `i` runs from waypoint
    /// `i - 1` to waypoint `i`).
    pub segment_index: usize,
    /// Minimum squared distance from the center to the segment.
    pub inner_distance_sq: f64,
    /// True if the segment dips inside the inner radius.
    pub inner_violation: bool,
    /// Maximum squared distance from the center to either endpoint.
    pub outer_distance_sq: f64,
    /// True if an endpoint lies beyond the outer radius.
    pub outer_violation: bool,
    /// True if the originating command was a rapid traversal.
    pub rapid: bool,
}

impl SegmentClassification {
    /// Whether the segment carries any geometric violation, regardless of
    /// the rapid tag.
    pub fn is_violation(&self) -> bool {
        self.inner_violation || self.outer_violation
    }

    /// Combined display status. Rapid overrides the geometric outcome.
    pub fn status(&self) -> SegmentStatus {
        if self.rapid {
            return SegmentStatus::Rapid;
        }
        match (self.inner_violation, self.outer_violation) {
            (false, false) => SegmentStatus::Clean,
            (true, false) => SegmentStatus::Inner,
            (false, true) => SegmentStatus::Outer,
            (true, true) => SegmentStatus::Both,
        }
    }
}

/// Classifies toolpath segments against an annulus.
///
/// Classification is a pure function of the waypoints and the annulus
/// parameters: the classifier holds no mutable state, each segment depends
/// only on its own two endpoints, and output order matches input order.
pub struct SegmentClassifier {
    annulus: Annulus,
    inner_sq: f64,
    outer_sq: f64,
}

impl SegmentClassifier {
    /// Create a classifier, rejecting invalid annulus parameters before any
    /// segment is processed.
    pub fn new(annulus: Annulus) -> Result<Self, AnnulusError> {
        annulus.validate()?;
        Ok(Self {
            annulus,
            inner_sq: annulus.inner_radius * annulus.inner_radius,
            outer_sq: annulus.outer_radius * annulus.outer_radius,
        })
    }

    /// The annulus this classifier checks against.
    pub fn annulus(&self) -> &Annulus {
        &self.annulus
    }

    /// Classify a single segment from `prev` to `cur`.
    ///
    /// The geometry is computed identically for rapid segments; the tag only
    /// changes the combined status reported by
    /// [`SegmentClassification::status`].
    pub fn classify_segment(
        &self,
        segment_index: usize,
        prev: Point,
        cur: Point,
        rapid: bool,
    ) -> SegmentClassification {
        let inner_distance_sq = self.annulus.center.distance_squared_to_segment(prev, cur);
        let outer_distance_sq = self
            .annulus
            .center
            .distance_squared(&prev)
            .max(self.annulus.center.distance_squared(&cur));

        SegmentClassification {
            segment_index,
            inner_distance_sq,
            inner_violation: inner_distance_sq < self.inner_sq,
            outer_distance_sq,
            outer_violation: outer_distance_sq > self.outer_sq,
            rapid,
        }
    }

    /// Classify every segment of a waypoint sequence, treating all segments
    /// as controlled moves.
    ///
    /// Fewer than two waypoints yields an empty list; there are no segments
    /// to classify.
    pub fn classify_path(&self, waypoints: &[Point]) -> Vec<SegmentClassification> {
        self.classify_path_with_rapids(waypoints, &[])
    }

    /// Classify every segment of a waypoint sequence with per-waypoint rapid
    /// tags.
    ///
    /// `rapid[i]` marks the segment ending at waypoint `i` as a rapid
    /// traversal; missing entries default to controlled. Entry 0 corresponds
    /// to the initial position and is never consulted.
    pub fn classify_path_with_rapids(
        &self,
        waypoints: &[Point],
        rapid: &[bool],
    ) -> Vec<SegmentClassification> {
        let mut classifications = Vec::with_capacity(waypoints.len().saturating_sub(1));
        for i in 1..waypoints.len() {
            classifications.push(self.classify_segment(
                i,
                waypoints[i - 1],
                waypoints[i],
                rapid.get(i).copied().unwrap_or(false),
            ));
        }
        classifications
    }
}
