//! Data models produced by the analyzer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sketch_core::{Geometry, NodeId};
use std::fmt;

/// Identity of a component mapping within one analysis run, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Recognized UI component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Button,
    Input,
    Card,
    Navbar,
    Text,
    Image,
    Container,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Card => "card",
            Self::Navbar => "navbar",
            Self::Text => "text",
            Self::Image => "image",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    String(String),
    Number(f64),
    Boolean(bool),
    List(Vec<String>),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<String>> for PropValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Ordered property map. Insertion order is part of the output contract.
pub type Props = IndexMap<String, PropValue>;

/// One recognized UI component plus its emitted code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMapping {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub props: Props,
    pub children: Vec<ComponentMapping>,
    /// Emitted source fragment. Empty until the emitter runs.
    pub code: String,
    /// Canvas region the component was read from.
    pub bounds: Geometry,
    /// Scene nodes claimed by this component (not by its children).
    pub provenance: Vec<NodeId>,
}

impl ComponentMapping {
    pub fn new(
        id: ComponentId,
        component_type: ComponentType,
        props: Props,
        bounds: Geometry,
        provenance: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            component_type,
            props,
            children: Vec::new(),
            code: String::new(),
            bounds,
            provenance,
        }
    }

    pub fn with_children(mut self, children: Vec<ComponentMapping>) -> Self {
        self.children = children;
        self
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.prop(name).and_then(PropValue::as_str)
    }

    /// This mapping and all nested mappings, depth-first.
    pub fn walk(&self) -> Vec<&ComponentMapping> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    /// Largest component id in this subtree.
    pub fn max_id(&self) -> ComponentId {
        self.children
            .iter()
            .map(ComponentMapping::max_id)
            .fold(self.id, ComponentId::max)
    }
}
