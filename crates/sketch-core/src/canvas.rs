//! Canvas objects as the drawing editor hands them over.
//!
//! This is the raw, loosely typed side of the boundary: every field is
//! optional and numbers may be missing or non-finite. [`crate::SceneGraph`]
//! normalizes it into the uniform node view the analyzer works on.

use crate::types::CanvasSize;

/// Read accessor implemented by the canvas editor.
pub trait CanvasSource {
    /// Top-level objects in render order.
    fn objects(&self) -> &[CanvasObject];

    /// Size of the drawing surface.
    fn canvas_size(&self) -> CanvasSize {
        CanvasSize::default()
    }
}

impl CanvasSource for [CanvasObject] {
    fn objects(&self) -> &[CanvasObject] {
        self
    }
}

impl CanvasSource for Vec<CanvasObject> {
    fn objects(&self) -> &[CanvasObject] {
        self
    }
}

/// A serialized canvas: surface size plus its object list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasDocument {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub objects: Vec<CanvasObject>,
}

impl CanvasDocument {
    pub fn new(size: CanvasSize, objects: Vec<CanvasObject>) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            objects,
        }
    }
}

impl CanvasSource for CanvasDocument {
    fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    fn canvas_size(&self) -> CanvasSize {
        let fallback = CanvasSize::default();
        let pick = |v: Option<f64>, d: f64| v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(d);
        CanvasSize::new(
            pick(self.width, fallback.width),
            pick(self.height, fallback.height),
        )
    }
}

/// Font weight as the editor stores it: a keyword or a numeric weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FontWeight {
    Numeric(f64),
    Keyword(String),
}

impl FontWeight {
    /// Numeric CSS weight; unknown keywords read as regular (400).
    pub fn to_numeric(&self) -> u16 {
        match self {
            Self::Numeric(n) if n.is_finite() => n.clamp(1.0, 1000.0) as u16,
            Self::Numeric(_) => 400,
            Self::Keyword(k) => match k.to_ascii_lowercase().as_str() {
                "thin" => 100,
                "light" | "lighter" => 300,
                "medium" => 500,
                "semibold" | "semi-bold" => 600,
                "bold" | "bolder" => 700,
                "extrabold" | "extra-bold" => 800,
                "black" => 900,
                other => other.parse().unwrap_or(400),
            },
        }
    }
}

/// One drawable object from the editor.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CanvasObject {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub object_type: String,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub angle: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::color"))]
    pub fill: Option<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::color"))]
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    /// Horizontal corner radius.
    pub rx: Option<f64>,
    pub opacity: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub src: Option<String>,
    /// Children, for groups.
    pub objects: Vec<CanvasObject>,
}

impl CanvasObject {
    /// Create an object of the given editor type.
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            ..Self::default()
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new("rect").with_bounds(x, y, width, height)
    }

    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new("ellipse").with_bounds(x, y, width, height)
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        let mut obj = Self::new("text");
        obj.left = Some(x);
        obj.top = Some(y);
        obj.text = Some(content.into());
        obj
    }

    pub fn image(x: f64, y: f64, width: f64, height: f64, src: impl Into<String>) -> Self {
        let mut obj = Self::new("image").with_bounds(x, y, width, height);
        obj.src = Some(src.into());
        obj
    }

    /// A group whose bounds are the union of its children.
    pub fn group(children: Vec<CanvasObject>) -> Self {
        let mut obj = Self::new("group");
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for child in &children {
            let (x, y) = (child.left.unwrap_or(0.0), child.top.unwrap_or(0.0));
            let (r, b) = (x + child.width.unwrap_or(0.0), y + child.height.unwrap_or(0.0));
            bounds = Some(match bounds {
                Some((x0, y0, r0, b0)) => (x0.min(x), y0.min(y), r0.max(r), b0.max(b)),
                None => (x, y, r, b),
            });
        }
        if let Some((x, y, r, b)) = bounds {
            obj = obj.with_bounds(x, y, r - x, b - y);
        }
        obj.objects = children;
        obj
    }

    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.left = Some(x);
        self.top = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_radius(mut self, rx: f64) -> Self {
        self.rx = Some(rx);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }
}

#[cfg(feature = "serde")]
mod lenient {
    use serde::de::{Deserialize, Deserializer, IgnoredAny};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Paint {
        Css(String),
        Other(IgnoredAny),
    }

    /// Gradient and pattern fills are objects; they read as "no color".
    pub fn color<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Paint>::deserialize(deserializer)? {
            Some(Paint::Css(s)) => Some(s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_bounds_cover_children() {
        let group = CanvasObject::group(vec![
            CanvasObject::rect(100.0, 400.0, 160.0, 48.0),
            CanvasObject::text(120.0, 410.0, "Go"),
        ]);
        assert_eq!(group.left, Some(100.0));
        assert_eq!(group.top, Some(400.0));
        assert_eq!(group.width, Some(160.0));
        assert_eq!(group.height, Some(48.0));
        assert_eq!(group.objects.len(), 2);
    }

    #[test]
    fn test_font_weight_numeric() {
        assert_eq!(FontWeight::Keyword("bold".into()).to_numeric(), 700);
        assert_eq!(FontWeight::Keyword("600".into()).to_numeric(), 600);
        assert_eq!(FontWeight::Keyword("normal".into()).to_numeric(), 400);
        assert_eq!(FontWeight::Numeric(f64::NAN).to_numeric(), 400);
    }

    #[test]
    fn test_document_size_fallback() {
        let doc = CanvasDocument {
            width: Some(f64::INFINITY),
            height: Some(600.0),
            objects: Vec::new(),
        };
        assert_eq!(doc.canvas_size(), CanvasSize::new(1200.0, 600.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_gradient_fill_reads_as_absent() {
        let obj: CanvasObject = serde_json::from_str(
            r##"{"type":"rect","left":1,"fill":{"type":"linear","colorStops":[]},"stroke":"#000"}"##,
        )
        .unwrap();
        assert_eq!(obj.fill, None);
        assert_eq!(obj.stroke.as_deref(), Some("#000"));
        assert_eq!(obj.left, Some(1.0));
    }
}
