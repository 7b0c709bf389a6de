//! SVG rendering of a classified toolpath.
//!
//! Draws the permitted annulus beneath the nozzle path and colors each
//! segment by its combined status:
//!
//! - yellow: rapid movement segment
//! - green: valid segment
//! - blue: segment crossing the inner radius area
//! - red: segment crossing the outer radius area
//! - purple: segment crossing both the outer and the inner radius area
//!
//! The output is a self-contained SVG document written by hand; writing
//! into a `String` is infallible, so the `write!` results are unwrapped.

use crate::annulus::{Annulus, SegmentStatus};
use crate::geometry::Point;
use std::fmt::Write;
use std::io;
use std::path::Path;

/// Colors for each segment status and the annulus itself.
#[derive(Clone, Debug)]
pub struct PlotColorScheme {
    /// Rapid movement segments.
    pub rapid: &'static str,
    /// Valid segments.
    pub clean: &'static str,
    /// Inner-violating segments.
    pub inner: &'static str,
    /// Outer-violating segments.
    pub outer: &'static str,
    /// Segments violating both bounds.
    pub both: &'static str,
    /// Permitted zone fill.
    pub zone: &'static str,
    /// Inner exclusion fill.
    pub exclusion: &'static str,
}

impl Default for PlotColorScheme {
    fn default() -> Self {
        Self {
            rapid: "#CCAA00",
            clean: "#22AA22",
            inner: "#2244CC",
            outer: "#CC2222",
            both: "#AA22AA",
            zone: "#22AA22",
            exclusion: "#FFFFFF",
        }
    }
}

impl PlotColorScheme {
    /// Color for a segment status.
    pub fn for_status(&self, status: SegmentStatus) -> &'static str {
        match status {
            SegmentStatus::Rapid => self.rapid,
            SegmentStatus::Clean => self.clean,
            SegmentStatus::Inner => self.inner,
            SegmentStatus::Outer => self.outer,
            SegmentStatus::Both => self.both,
        }
    }
}

/// Configuration for SVG rendering.
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Pixels per millimeter.
    pub scale: f64,
    /// Segment line width in pixels.
    pub stroke_width: f64,
    /// Padding around the drawing area in pixels.
    pub padding: f64,
    /// Color scheme.
    pub colors: PlotColorScheme,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            stroke_width: 2.0,
            padding: 20.0,
            colors: PlotColorScheme::default(),
        }
    }
}

/// SVG plot builder for a classified path.
pub struct PathPlot {
    config: PlotConfig,
    annulus: Annulus,
    waypoints: Vec<Point>,
    statuses: Vec<SegmentStatus>,
    title: Option<String>,
}

impl PathPlot {
    /// Create a plot for a path and its per-segment statuses.
    ///
    /// `statuses` must hold one entry per segment, i.e. one less than the
    /// waypoint count.
    pub fn new(annulus: Annulus, waypoints: Vec<Point>, statuses: Vec<SegmentStatus>) -> Self {
        Self {
            config: PlotConfig::default(),
            annulus,
            waypoints,
            statuses,
            title: None,
        }
    }

    /// Override the rendering configuration.
    pub fn with_config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a title displayed above the drawing.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Square world-coordinate window `[m, max]` around the path and the
    /// inner radius, with a margin proportional to the inner radius.
    fn world_bounds(&self) -> (f64, f64) {
        let r = self.annulus.inner_radius;
        let margin = (0.25 * r).max(1.0);

        let mut lo = -0.5 * r;
        let mut hi = 0.5 * r;
        for p in &self.waypoints {
            lo = lo.min(p.x - margin).min(p.y - margin);
            hi = hi.max(p.x + margin).max(p.y + margin);
        }
        (lo, hi)
    }

    /// Render to an SVG string.
    pub fn render(&self) -> String {
        let (lo, hi) = self.world_bounds();
        let map_px = (hi - lo) * self.config.scale;
        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 5.0 * 20.0 + 25.0;

        let width = map_px + 2.0 * padding;
        let height = map_px + 2.0 * padding + title_height + legend_height;

        let to_px_x = |x: f64| (x - lo) * self.config.scale;
        // SVG Y-axis points down.
        let to_px_y = |y: f64| map_px - (y - lo) * self.config.scale;

        let mut svg = String::new();
        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )
        .unwrap();
        writeln!(
            &mut svg,
            r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##
        )
        .unwrap();

        if let Some(ref title) = self.title {
            writeln!(
                &mut svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                title
            )
            .unwrap();
        }

        writeln!(
            &mut svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding,
            padding + title_height
        )
        .unwrap();

        self.render_annulus(&mut svg, hi, &to_px_x, &to_px_y);
        self.render_segments(&mut svg, &to_px_x, &to_px_y);

        writeln!(&mut svg, "  </g>").unwrap();

        let legend_y = padding + title_height + map_px + 10.0;
        self.render_legend(&mut svg, width, legend_y);

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    /// Draw the permitted zone and the inner exclusion disk.
    fn render_annulus(
        &self,
        svg: &mut String,
        hi: f64,
        to_px_x: &dyn Fn(f64) -> f64,
        to_px_y: &dyn Fn(f64) -> f64,
    ) {
        let cx = to_px_x(self.annulus.center.x);
        let cy = to_px_y(self.annulus.center.y);

        // An infinite outer radius is clipped to slightly beyond the window
        // diagonal so the zone still reads as covering the whole drawing.
        let zone_radius = self.annulus.outer_radius.min(1.42 * hi.abs().max(1.0));
        writeln!(
            svg,
            r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" opacity="0.2"/>"#,
            cx,
            cy,
            zone_radius * self.config.scale,
            self.config.colors.zone
        )
        .unwrap();

        if self.annulus.inner_radius > 0.0 {
            writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                cx,
                cy,
                self.annulus.inner_radius * self.config.scale,
                self.config.colors.exclusion
            )
            .unwrap();
        }
    }

    /// Draw each segment colored by status.
    fn render_segments(
        &self,
        svg: &mut String,
        to_px_x: &dyn Fn(f64) -> f64,
        to_px_y: &dyn Fn(f64) -> f64,
    ) {
        writeln!(svg, r#"    <g id="path">"#).unwrap();

        for (i, status) in self.statuses.iter().enumerate() {
            let (Some(a), Some(b)) = (self.waypoints.get(i), self.waypoints.get(i + 1)) else {
                break;
            };
            writeln!(
                svg,
                r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                to_px_x(a.x),
                to_px_y(a.y),
                to_px_x(b.x),
                to_px_y(b.y),
                self.config.colors.for_status(*status),
                self.config.stroke_width
            )
            .unwrap();
        }

        writeln!(svg, "    </g>").unwrap();
    }

    /// Draw the five-entry color legend.
    fn render_legend(&self, svg: &mut String, svg_width: f64, y_offset: f64) {
        let entries = [
            (self.config.colors.rapid, "Rapid movement segment"),
            (self.config.colors.clean, "Valid segment"),
            (self.config.colors.inner, "Crosses inner radius area"),
            (self.config.colors.outer, "Crosses outer radius area"),
            (self.config.colors.both, "Crosses both radius areas"),
        ];

        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12" transform="translate(0, {:.0})">"#,
            y_offset
        )
        .unwrap();
        writeln!(
            svg,
            r##"    <rect x="10" y="0" width="{:.0}" height="{:.0}" fill="white" stroke="#CCC" stroke-width="1" rx="4"/>"##,
            svg_width - 20.0,
            entries.len() as f64 * 20.0 + 10.0
        )
        .unwrap();

        let mut entry_y = 20.0;
        for (color, label) in entries {
            writeln!(
                svg,
                r#"    <line x1="20" y1="{:.0}" x2="50" y2="{:.0}" stroke="{}" stroke-width="3"/>"#,
                entry_y, entry_y, color
            )
            .unwrap();
            writeln!(
                svg,
                r##"    <text x="60" y="{:.0}" fill="#333">{}</text>"##,
                entry_y + 4.0,
                label
            )
            .unwrap();
            entry_y += 20.0;
        }

        writeln!(svg, "  </g>").unwrap();
    }

    /// Save the rendered SVG to a file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render())
    }
}
