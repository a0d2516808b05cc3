//! Proximity queries linking otherwise unconnected nodes.

use crate::config::AnalyzerConfig;
use sketch_core::{SceneGraph, SceneNode};

/// HTML input type inferred from a field's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Email,
    Password,
    Tel,
    Number,
    Date,
}

/// Label keywords in match priority. Matching is case-insensitive substring.
const INPUT_TYPE_KEYWORDS: &[(&str, InputType)] = &[
    ("email", InputType::Email),
    ("password", InputType::Password),
    ("phone", InputType::Tel),
    ("tel", InputType::Tel),
    ("number", InputType::Number),
    ("amount", InputType::Number),
    ("date", InputType::Date),
];

impl InputType {
    /// Infer from a label; anything unmatched (or no label) is free text.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Text;
        };
        let label = label.to_lowercase();
        INPUT_TYPE_KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, ty)| *ty)
            .unwrap_or(Self::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// Text nodes of a scene, indexed once per analysis run.
pub struct SpatialIndex<'a> {
    texts: Vec<&'a SceneNode>,
    config: &'a AnalyzerConfig,
}

impl<'a> SpatialIndex<'a> {
    pub fn new(graph: &'a SceneGraph, config: &'a AnalyzerConfig) -> Self {
        Self {
            texts: graph
                .text_nodes()
                .filter(|n| !n.text_content().trim().is_empty())
                .collect(),
            config,
        }
    }

    /// Text of the first label, in document order, sitting directly above
    /// or directly left of `node`.
    pub fn find_nearby_label(&self, node: &SceneNode) -> Option<&'a str> {
        let found: Option<&'a SceneNode> = self.texts.iter().copied().find(|text| {
            text.id != node.id && (self.is_above(text, node) || self.is_left_of(text, node))
        });
        tracing::trace!(node = %node.id, label = ?found.map(|t| t.id), "label lookup");
        found.map(|t| t.text_content().trim())
    }

    fn is_above(&self, text: &SceneNode, node: &SceneNode) -> bool {
        let gap = node.geometry.y - text.geometry.y;
        gap > 0.0
            && gap <= self.config.label_max_vertical_gap
            && (text.geometry.x - node.geometry.x).abs() <= self.config.label_horizontal_tolerance
    }

    fn is_left_of(&self, text: &SceneNode, node: &SceneNode) -> bool {
        let gap = node.geometry.x - text.geometry.right();
        (text.geometry.y - node.geometry.y).abs() <= self.config.label_vertical_tolerance
            && text.geometry.x < node.geometry.x
            && (0.0..=self.config.label_max_horizontal_gap).contains(&gap)
    }
}
