//! UI pattern recognition strategies.
//!
//! Strategies are evaluated in a fixed priority order and the first match
//! wins. The order is a tie-break policy: a small rounded group with a label
//! is a button before it can be read as a card, and a full-width element at
//! the top of the canvas is a navbar before it falls through to a generic
//! container.

use super::synthesizer;
use super::AnalysisContext;
use crate::model::{ComponentType, Props};
use sketch_core::{NodeKind, SceneNode};

/// A recognizable UI pattern.
pub trait PatternStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Component type produced on a match.
    fn component_type(&self) -> ComponentType;

    /// Structural predicate.
    fn matches(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> bool;

    /// Extract props for a node this strategy matched.
    fn synthesize(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props;

    /// Whether a match claims every descendant of the node.
    fn claims_subtree(&self) -> bool {
        true
    }
}

/// Rounded, moderately wide shape with a label.
pub struct ButtonPattern;

impl PatternStrategy for ButtonPattern {
    fn name(&self) -> &'static str {
        "button"
    }

    fn component_type(&self) -> ComponentType {
        ComponentType::Button
    }

    fn matches(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> bool {
        if !matches!(node.kind, NodeKind::Rectangle | NodeKind::Group) {
            return false;
        }
        if synthesizer::surface(node, ctx.graph).style.corner_radius <= 0.0 {
            return false;
        }
        if node.is_group()
            && !ctx
                .graph
                .descendants(node.id)
                .iter()
                .any(|n| n.kind == NodeKind::Text)
        {
            return false;
        }
        node.geometry.aspect_ratio().is_some_and(|ratio| {
            ratio > ctx.config.button_min_aspect && ratio < ctx.config.button_max_aspect
        })
    }

    fn synthesize(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
        synthesizer::button(node, ctx)
    }
}

/// Wide, light, outlined rectangle.
pub struct InputPattern;

impl PatternStrategy for InputPattern {
    fn name(&self) -> &'static str {
        "input"
    }

    fn component_type(&self) -> ComponentType {
        ComponentType::Input
    }

    fn matches(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> bool {
        node.kind == NodeKind::Rectangle
            && node
                .geometry
                .aspect_ratio()
                .is_some_and(|ratio| ratio > ctx.config.input_min_aspect)
            && node
                .style
                .visible_fill()
                .is_some_and(|fill| ctx.config.is_light_fill(&fill))
            && node.style.has_stroke()
    }

    fn synthesize(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
        synthesizer::input(node, ctx)
    }

    fn claims_subtree(&self) -> bool {
        false
    }
}

/// Group with a filled background shape and some text.
pub struct CardPattern;

impl PatternStrategy for CardPattern {
    fn name(&self) -> &'static str {
        "card"
    }

    fn component_type(&self) -> ComponentType {
        ComponentType::Card
    }

    fn matches(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> bool {
        if !node.is_group() || node.children.len() < ctx.config.card_min_children {
            return false;
        }
        let mut has_background = false;
        let mut has_text = false;
        for child in ctx.graph.children(node.id) {
            match child.kind {
                NodeKind::Rectangle => has_background |= child.style.visible_fill().is_some(),
                NodeKind::Text => has_text = true,
                _ => {}
            }
        }
        has_background && has_text
    }

    fn synthesize(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
        synthesizer::card(node, ctx)
    }
}

/// Full-width element anchored to the top of the canvas.
pub struct NavbarPattern;

impl PatternStrategy for NavbarPattern {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn component_type(&self) -> ComponentType {
        ComponentType::Navbar
    }

    fn matches(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> bool {
        let canvas = ctx.graph.canvas();
        node.geometry.y <= ctx.config.navbar_max_top
            && node.geometry.width >= canvas.width * ctx.config.navbar_min_width_ratio
    }

    fn synthesize(&self, node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
        synthesizer::navbar(node, ctx)
    }
}

/// The built-in strategies in priority order: button, input, card, navbar.
pub fn default_strategies() -> Vec<Box<dyn PatternStrategy>> {
    vec![
        Box::new(ButtonPattern),
        Box::new(InputPattern),
        Box::new(CardPattern),
        Box::new(NavbarPattern),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::spatial::SpatialIndex;
    use crate::config::AnalyzerConfig;
    use sketch_core::{CanvasObject, CanvasSize, NodeId, SceneGraph};

    /// Names of the strategies matching the first top-level node.
    fn matching(object: CanvasObject) -> Vec<&'static str> {
        let graph = SceneGraph::from_objects(&[object], CanvasSize::new(1200.0, 800.0));
        let config = AnalyzerConfig::default();
        let spatial = SpatialIndex::new(&graph, &config);
        let ctx = AnalysisContext {
            graph: &graph,
            config: &config,
            spatial: &spatial,
        };
        let node = graph.node(NodeId(0)).unwrap();
        default_strategies()
            .iter()
            .filter(|s| s.matches(node, &ctx))
            .map(|s| s.name())
            .collect()
    }

    fn rounded_submit() -> CanvasObject {
        CanvasObject::group(vec![
            CanvasObject::rect(100.0, 400.0, 160.0, 48.0)
                .with_fill("#2563EB")
                .with_radius(8.0),
            CanvasObject::text(150.0, 412.0, "Submit"),
        ])
    }

    #[test]
    fn test_rounded_group_matches_button_and_card() {
        // Both match; priority order decides.
        assert_eq!(matching(rounded_submit()), vec!["button", "card"]);
    }

    #[test]
    fn test_button_aspect_bounds_are_exclusive() {
        let exact = CanvasObject::rect(0.0, 300.0, 100.0, 50.0).with_radius(4.0);
        assert!(matching(exact).is_empty());
        let inside = CanvasObject::rect(0.0, 300.0, 101.0, 50.0).with_radius(4.0);
        assert_eq!(matching(inside), vec!["button"]);
    }

    #[test]
    fn test_button_group_needs_text() {
        let group = CanvasObject::group(vec![CanvasObject::rect(0.0, 300.0, 160.0, 48.0).with_radius(8.0)]);
        assert!(!matching(group).contains(&"button"));
    }

    #[test]
    fn test_input_requires_light_fill_and_stroke() {
        let input = CanvasObject::rect(100.0, 140.0, 300.0, 40.0)
            .with_fill("#FFFFFF")
            .with_stroke("#D1D5DB", 1.0);
        assert_eq!(matching(input), vec!["input"]);

        let no_stroke = CanvasObject::rect(100.0, 140.0, 300.0, 40.0).with_fill("#FFFFFF");
        assert!(matching(no_stroke).is_empty());

        let dark = CanvasObject::rect(100.0, 140.0, 300.0, 40.0)
            .with_fill("#1F2937")
            .with_stroke("#000000", 1.0);
        assert!(matching(dark).is_empty());
    }

    #[test]
    fn test_navbar_geometry() {
        let bar = CanvasObject::rect(0.0, 0.0, 970.0, 64.0).with_fill("#111827");
        assert_eq!(matching(bar), vec!["navbar"]);

        let narrow = CanvasObject::rect(0.0, 0.0, 950.0, 64.0).with_fill("#111827");
        assert!(matching(narrow).is_empty());

        let low = CanvasObject::rect(0.0, 101.0, 1200.0, 64.0).with_fill("#111827");
        assert!(matching(low).is_empty());
    }

    #[test]
    fn test_zero_height_never_matches_ratio_predicates() {
        let flat = CanvasObject::rect(0.0, 500.0, 300.0, 0.0)
            .with_fill("#FFFFFF")
            .with_stroke("#000000", 1.0)
            .with_radius(4.0);
        assert!(matching(flat).is_empty());
    }
}
