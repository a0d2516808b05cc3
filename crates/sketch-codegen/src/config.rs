//! Analyzer configuration.
//!
//! Every geometric threshold the classifier and resolver use lives here. The
//! defaults are the stock values; callers may tune them, e.g.
//! from a JSON file where any omitted field keeps its default.

use crate::error::{CodegenError, Result};
use serde::{Deserialize, Serialize};
use sketch_core::Color;

/// Thresholds for pattern classification and spatial lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Button aspect ratio lower bound (exclusive).
    pub button_min_aspect: f64,
    /// Button aspect ratio upper bound (exclusive).
    pub button_max_aspect: f64,
    /// Input aspect ratio lower bound (exclusive).
    pub input_min_aspect: f64,
    /// Fills that always count as light, as CSS colors.
    pub light_fills: Vec<String>,
    /// Any fill at or above this relative luminance counts as light.
    pub light_fill_min_luminance: f32,
    /// Any fill at or below this relative luminance counts as near-black.
    pub dark_fill_max_luminance: f32,
    /// Minimum number of direct children for a card.
    pub card_min_children: usize,
    /// Navbar top edge must be at most this far from the canvas top.
    pub navbar_max_top: f64,
    /// Navbar width as a fraction of canvas width.
    pub navbar_min_width_ratio: f64,
    /// Label above an input: max distance between left edges.
    pub label_horizontal_tolerance: f64,
    /// Label above an input: max distance between top edges.
    pub label_max_vertical_gap: f64,
    /// Label left of an input: max distance between top edges.
    pub label_vertical_tolerance: f64,
    /// Label left of an input: max gap between label right and input left.
    pub label_max_horizontal_gap: f64,
    /// Exclusive font-size floors for the h1, h2 and h3 tiers.
    pub heading_font_sizes: [f64; 3],
    /// Enable the row grouping optimizer.
    pub group_rows: bool,
    /// Max difference between vertical centers of components in one row.
    pub row_alignment_tolerance: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            button_min_aspect: 2.0,
            button_max_aspect: 6.0,
            input_min_aspect: 4.0,
            light_fills: ["#FFFFFF", "#FAFAFA", "#F9FAFB", "#F5F5F5", "#F3F4F6"]
                .into_iter()
                .map(String::from)
                .collect(),
            light_fill_min_luminance: 0.9,
            dark_fill_max_luminance: 0.05,
            card_min_children: 2,
            navbar_max_top: 100.0,
            navbar_min_width_ratio: 0.8,
            label_horizontal_tolerance: 20.0,
            label_max_vertical_gap: 50.0,
            label_vertical_tolerance: 10.0,
            label_max_horizontal_gap: 150.0,
            // h3 floor raised from 18 to 20 so that plain 20-unit text stays a paragraph.
            heading_font_sizes: [32.0, 24.0, 20.0],
            group_rows: false,
            row_alignment_tolerance: 8.0,
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make predicates unsatisfiable.
    pub fn validate(&self) -> Result<()> {
        if !(self.button_min_aspect > 0.0 && self.button_min_aspect < self.button_max_aspect) {
            return Err(CodegenError::InvalidConfig(format!(
                "button aspect range ({}, {}) is empty",
                self.button_min_aspect, self.button_max_aspect
            )));
        }
        if !(self.navbar_min_width_ratio > 0.0 && self.navbar_min_width_ratio <= 1.0) {
            return Err(CodegenError::InvalidConfig(format!(
                "navbar_min_width_ratio must be in (0, 1], got {}",
                self.navbar_min_width_ratio
            )));
        }
        let [h1, h2, h3] = self.heading_font_sizes;
        if !(h1 >= h2 && h2 >= h3) {
            return Err(CodegenError::InvalidConfig(
                "heading_font_sizes must be descending".to_string(),
            ));
        }
        let tolerances = [
            ("label_horizontal_tolerance", self.label_horizontal_tolerance),
            ("label_max_vertical_gap", self.label_max_vertical_gap),
            ("label_vertical_tolerance", self.label_vertical_tolerance),
            ("label_max_horizontal_gap", self.label_max_horizontal_gap),
            ("row_alignment_tolerance", self.row_alignment_tolerance),
        ];
        if let Some((name, value)) = tolerances.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(CodegenError::InvalidConfig(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
        if let Some(bad) = self.light_fills.iter().find(|c| Color::parse(c).is_none()) {
            return Err(CodegenError::InvalidConfig(format!(
                "light fill {bad:?} is not a color"
            )));
        }
        Ok(())
    }

    /// Whether a fill reads as a near-white input background.
    pub fn is_light_fill(&self, color: &Color) -> bool {
        if color.relative_luminance() >= self.light_fill_min_luminance {
            return true;
        }
        let rgba = color.to_rgba8();
        self.light_fills
            .iter()
            .filter_map(|c| Color::parse(c))
            .any(|c| c.to_rgba8() == rgba)
    }

    /// Whether a fill reads as a primary (near-black) surface.
    pub fn is_near_black(&self, color: &Color) -> bool {
        color.relative_luminance() <= self.dark_fill_max_luminance
    }
}
