//! Normalized, read-only scene graph.
//!
//! The reader flattens the editor's nested object list into an arena indexed
//! by [`NodeId`]. Ids follow pre-order, so every subtree is a contiguous slice
//! of the arena and document order is simply id order.

use crate::canvas::{CanvasObject, CanvasSource};
use crate::types::{CanvasSize, Color, Geometry, NodeId, NodeKind, Style};
use smallvec::SmallVec;

/// Default font size for text objects that don't carry one.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Text payload of a text node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextContent {
    pub content: String,
    pub font_size: f64,
    pub font_weight: u16,
}

impl TextContent {
    pub fn is_bold(&self) -> bool {
        self.font_weight >= 600
    }
}

/// One element of the scene, normalized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub geometry: Geometry,
    pub style: Style,
    /// Present for text nodes.
    pub text: Option<TextContent>,
    /// Image reference, for image nodes.
    pub src: Option<String>,
    pub parent: Option<NodeId>,
    /// Direct children in document order. Empty unless `kind` is a group.
    pub children: SmallVec<[NodeId; 4]>,
    /// One past the last id of this node's subtree.
    subtree_end: NodeId,
}

impl SceneNode {
    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }

    /// Text content, or `""` for non-text nodes.
    pub fn text_content(&self) -> &str {
        self.text.as_ref().map(|t| t.content.as_str()).unwrap_or("")
    }

    pub fn font_size(&self) -> f64 {
        self.text
            .as_ref()
            .map(|t| t.font_size)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// The whole scene as an arena of [`SceneNode`]s.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    canvas: CanvasSize,
}

impl SceneGraph {
    /// Read the current contents of a canvas.
    pub fn read<S: CanvasSource + ?Sized>(source: &S) -> Self {
        Self::from_objects(source.objects(), source.canvas_size())
    }

    /// Read a list of top-level objects, keeping their order.
    pub fn from_objects(objects: &[CanvasObject], canvas: CanvasSize) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            roots: Vec::with_capacity(objects.len()),
            canvas,
        };
        for object in objects {
            let id = graph.push(object, None);
            graph.roots.push(id);
        }
        tracing::debug!(
            roots = graph.roots.len(),
            nodes = graph.nodes.len(),
            "read scene graph"
        );
        graph
    }

    /// Parse a serialized canvas: either a document object with `width`,
    /// `height` and `objects`, or a bare array of objects.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        use crate::canvas::CanvasDocument;

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Input {
            Objects(Vec<CanvasObject>),
            Document(CanvasDocument),
        }

        let doc = match serde_json::from_str::<Input>(json) {
            Ok(Input::Objects(objects)) => CanvasDocument {
                objects,
                ..CanvasDocument::default()
            },
            Ok(Input::Document(doc)) => doc,
            // Untagged errors are opaque; decode again for a useful message.
            Err(_) => serde_json::from_str::<CanvasDocument>(json)?,
        };
        Ok(Self::read(&doc))
    }

    fn push(&mut self, object: &CanvasObject, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let kind = NodeKind::from_object_type(&object.object_type);
        self.nodes.push(normalize(id, kind, object, parent));

        if kind == NodeKind::Group {
            let children: SmallVec<[NodeId; 4]> = object
                .objects
                .iter()
                .map(|child| self.push(child, Some(id)))
                .collect();
            self.nodes[id.index()].children = children;
        } else if !object.objects.is_empty() {
            tracing::debug!(%id, kind = kind.as_str(), "ignoring children of non-group object");
        }

        self.nodes[id.index()].subtree_end = NodeId(self.nodes.len() as u32);
        id
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node, in document order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Top-level nodes in render order.
    pub fn roots(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.roots.iter().map(move |id| &self.nodes[id.index()])
    }

    /// Direct children of `id`.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SceneNode> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(move |n| n.children.iter().map(move |c| &self.nodes[c.index()]))
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> &[SceneNode] {
        match self.node(id) {
            Some(node) => &self.nodes[id.index() + 1..node.subtree_end.index()],
            None => &[],
        }
    }

    /// Text nodes of the whole graph, in document order.
    pub fn text_nodes(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Text)
    }
}

fn normalize(id: NodeId, kind: NodeKind, object: &CanvasObject, parent: Option<NodeId>) -> SceneNode {
    let num = |field: &'static str, value: Option<f64>, default: f64| -> f64 {
        match value {
            Some(v) if v.is_finite() => v,
            Some(v) => {
                tracing::debug!(%id, field, value = %v, "non-finite value defaulted");
                default
            }
            None => default,
        }
    };
    let color = |field: &'static str, value: &Option<String>| -> Option<Color> {
        let raw = value.as_deref()?;
        let parsed = Color::parse(raw);
        if parsed.is_none() {
            tracing::debug!(%id, field, value = raw, "unparseable color ignored");
        }
        parsed
    };

    let scale_x = num("scaleX", object.scale_x, 1.0);
    let scale_y = num("scaleY", object.scale_y, 1.0);
    let geometry = Geometry {
        x: num("left", object.left, 0.0),
        y: num("top", object.top, 0.0),
        width: num("width", object.width, 0.0) * scale_x,
        height: num("height", object.height, 0.0) * scale_y,
        rotation: num("angle", object.angle, 0.0),
    };

    let style = Style {
        fill: color("fill", &object.fill),
        stroke: color("stroke", &object.stroke),
        stroke_width: num("strokeWidth", object.stroke_width, 0.0),
        corner_radius: num("rx", object.rx, 0.0),
        opacity: num("opacity", object.opacity, 1.0),
    };

    let text = (kind == NodeKind::Text).then(|| TextContent {
        content: object.text.clone().unwrap_or_default(),
        font_size: num("fontSize", object.font_size, DEFAULT_FONT_SIZE),
        font_weight: object
            .font_weight
            .as_ref()
            .map(|w| w.to_numeric())
            .unwrap_or(400),
    });

    SceneNode {
        id,
        kind,
        geometry,
        style,
        text,
        src: if kind == NodeKind::Image {
            object.src.clone()
        } else {
            None
        },
        parent,
        children: SmallVec::new(),
        subtree_end: NodeId(id.0 + 1),
    }
}
