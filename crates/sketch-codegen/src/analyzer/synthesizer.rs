//! Property extraction for classified nodes.
//!
//! Every extractor is total: a missing field degrades to a documented
//! default instead of failing.

use super::spatial::InputType;
use super::AnalysisContext;
use crate::model::{ComponentType, Props};
use sketch_core::{NodeKind, SceneGraph, SceneNode};

pub const DEFAULT_BUTTON_LABEL: &str = "Button";
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Enter text...";
pub const DEFAULT_CARD_TITLE: &str = "Card Title";
pub const DEFAULT_BRAND: &str = "Brand";
pub const DEFAULT_NAV_ITEMS: [&str; 3] = ["Home", "About", "Contact"];

/// Node carrying the visible surface of a component.
///
/// For a group without its own fill or corner radius this is its first
/// rectangle child (the background shape).
pub fn surface<'g>(node: &'g SceneNode, graph: &'g SceneGraph) -> &'g SceneNode {
    if node.kind != NodeKind::Group
        || node.style.visible_fill().is_some()
        || node.style.corner_radius > 0.0
    {
        return node;
    }
    graph
        .children(node.id)
        .find(|c| c.kind == NodeKind::Rectangle)
        .unwrap_or(node)
}

/// Non-empty text nodes inside `node`, in document order.
fn nested_texts<'g>(node: &SceneNode, graph: &'g SceneGraph) -> impl Iterator<Item = &'g SceneNode> {
    graph
        .descendants(node.id)
        .iter()
        .filter(|n| n.kind == NodeKind::Text && !n.text_content().trim().is_empty())
}

pub fn button(node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
    let label = nested_texts(node, ctx.graph)
        .next()
        .map(|t| t.text_content().trim().to_string())
        .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string());

    let fill = surface(node, ctx.graph).style.visible_fill();
    let variant = match fill {
        None => "outline",
        Some(c) if ctx.config.is_near_black(&c) => "primary",
        Some(_) => "secondary",
    };

    let mut props = Props::new();
    props.insert("label".into(), label.into());
    props.insert("variant".into(), variant.into());
    if let Some(c) = fill {
        props.insert("background".into(), c.to_hex().into());
    }
    props
}

pub fn input(node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
    let label = ctx.spatial.find_nearby_label(node);
    let input_type = InputType::from_label(label);

    let mut props = Props::new();
    props.insert(
        "placeholder".into(),
        label.unwrap_or(DEFAULT_INPUT_PLACEHOLDER).into(),
    );
    props.insert("type".into(), input_type.as_str().into());
    if let Some(label) = label {
        props.insert("label".into(), label.into());
    }
    props
}

pub fn card(node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
    let texts: Vec<&SceneNode> = nested_texts(node, ctx.graph).collect();
    // Largest font wins; the earliest node keeps ties.
    let title = texts
        .iter()
        .copied()
        .fold(None::<&SceneNode>, |best, t| match best {
            Some(b) if b.font_size() >= t.font_size() => Some(b),
            _ => Some(t),
        });
    let description = texts
        .iter()
        .find(|t| Some(t.id) != title.map(|n| n.id));
    let image = ctx
        .graph
        .descendants(node.id)
        .iter()
        .find(|n| n.kind == NodeKind::Image)
        .and_then(|n| n.src.clone());

    let mut props = Props::new();
    props.insert(
        "title".into(),
        title
            .map(|t| t.text_content().trim())
            .unwrap_or(DEFAULT_CARD_TITLE)
            .into(),
    );
    if let Some(description) = description {
        props.insert("description".into(), description.text_content().trim().into());
    }
    if let Some(src) = image {
        props.insert("image".into(), src.into());
    }
    props
}

pub fn navbar(node: &SceneNode, ctx: &AnalysisContext<'_>) -> Props {
    let mut items: Vec<String> = nested_texts(node, ctx.graph)
        .map(|t| t.text_content().trim().to_string())
        .collect();
    if items.is_empty() {
        items = DEFAULT_NAV_ITEMS.iter().map(|s| s.to_string()).collect();
    }

    let mut props = Props::new();
    props.insert("brand".into(), DEFAULT_BRAND.into());
    props.insert("items".into(), items.into());
    props
}

/// Generic fallback by node kind. Always succeeds.
pub fn generic(node: &SceneNode, ctx: &AnalysisContext<'_>) -> (ComponentType, Props) {
    let mut props = Props::new();
    match node.kind {
        NodeKind::Text => {
            props.insert("tag".into(), text_tag(node, ctx).into());
            props.insert("content".into(), node.text_content().into());
            (ComponentType::Text, props)
        }
        NodeKind::Image => {
            props.insert("src".into(), node.src.clone().unwrap_or_default().into());
            props.insert("width".into(), node.geometry.width.into());
            props.insert("height".into(), node.geometry.height.into());
            (ComponentType::Image, props)
        }
        NodeKind::Rectangle | NodeKind::Ellipse => {
            props.insert("shape".into(), node.kind.as_str().into());
            props.insert("width".into(), node.geometry.width.into());
            props.insert("height".into(), node.geometry.height.into());
            if let Some(fill) = node.style.visible_fill() {
                props.insert("background".into(), fill.to_hex().into());
            }
            (ComponentType::Container, props)
        }
        NodeKind::Group => {
            props.insert("layout".into(), "column".into());
            (ComponentType::Container, props)
        }
    }
}

/// Semantic tag for a standalone text node, by font size then weight.
fn text_tag(node: &SceneNode, ctx: &AnalysisContext<'_>) -> &'static str {
    let size = node.font_size();
    let [h1, h2, h3] = ctx.config.heading_font_sizes;
    let bold = node.text.as_ref().is_some_and(|t| t.is_bold());
    if size > h1 {
        "h1"
    } else if size > h2 {
        "h2"
    } else if size > h3 {
        "h3"
    } else if bold {
        "strong"
    } else {
        "p"
    }
}
