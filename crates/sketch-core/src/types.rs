//! Value types shared by the scene model: identifiers, colors, geometry, style.

use crate::errors::CoreError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identity of a scene node.
///
/// Ids are assigned by the reader in pre-order, so a node's descendants occupy
/// the contiguous id range directly after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Drawable kind of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    Rectangle,
    Ellipse,
    Text,
    Image,
    Group,
}

impl NodeKind {
    /// Map an editor object type onto the shape vocabulary.
    ///
    /// Unknown types read as rectangles, the most generic drawable.
    pub fn from_object_type(object_type: &str) -> Self {
        match object_type.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Self::Rectangle,
            "circle" | "ellipse" => Self::Ellipse,
            "text" | "i-text" | "itext" | "textbox" => Self::Text,
            "image" | "img" => Self::Image,
            "group" => Self::Group,
            _ => Self::Rectangle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
            Self::Image => "image",
            Self::Group => "group",
        }
    }
}

/// Size of the drawing surface the scene was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

/// Position and size of a node in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees. Carried through but not interpreted.
    pub rotation: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Width divided by height, or `None` when the height is not positive.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    /// Smallest geometry covering both `self` and `other`.
    pub fn union(&self, other: &Geometry) -> Geometry {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Geometry::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Paint attributes of a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub corner_radius: f64,
    pub opacity: f64,
}

impl Style {
    /// Fill that actually paints something.
    pub fn visible_fill(&self) -> Option<Color> {
        self.fill.filter(|c| !c.is_transparent())
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && self.stroke.is_some_and(|c| !c.is_transparent())
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
            opacity: 1.0,
        }
    }
}

/// A color value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`, `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 17;
                }
                Some(Self::from_rgb8(rgb[0], rgb[1], rgb[2]))
            }
            6 => Some(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => {
                let base = Self::from_rgb8(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                );
                Some(Self {
                    a: channel(&hex[6..8])? as f32 / 255.0,
                    ..base
                })
            }
            _ => None,
        }
    }

    /// Parse any color notation the editor emits: hex, `rgb()`/`rgba()`,
    /// `none`, and the CSS named colors and functions (`red`, `lightgray`,
    /// `hsl(...)`). Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "" => None,
            "transparent" | "none" => Some(Self::TRANSPARENT),
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            lower if lower.starts_with('#') => Self::from_hex(lower),
            lower if lower.starts_with("rgb") => Self::from_functional(lower),
            lower => Self::from_css(lower),
        }
    }

    /// Named colors and the remaining CSS color functions.
    fn from_css(value: &str) -> Option<Self> {
        let [r, g, b, a] = csscolorparser::parse(value).ok()?.to_rgba8();
        Some(Self {
            a: a as f32 / 255.0,
            ..Self::from_rgb8(r, g, b)
        })
    }

    fn from_functional(value: &str) -> Option<Self> {
        static FUNCTIONAL: OnceLock<Regex> = OnceLock::new();
        let re = FUNCTIONAL.get_or_init(|| {
            Regex::new(
                r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
            )
            .expect("static color pattern")
        });
        let caps = re.captures(value)?;
        let channel = |i: usize| -> Option<u8> { caps.get(i)?.as_str().parse::<u16>().ok()?.try_into().ok() };
        let alpha = match caps.get(4) {
            Some(a) => a.as_str().parse::<f32>().ok()?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Some(Self {
            a: alpha,
            ..Self::from_rgb8(channel(1)?, channel(2)?, channel(3)?)
        })
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to8(self.r), to8(self.g), to8(self.b), to8(self.a))
    }

    /// Convert to hex string (e.g., "#FF5733").
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f32 {
        fn linear(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= f32::EPSILON
    }

    // Common colors
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidColor {
            value: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("111827").unwrap().to_hex(), "#111827");
        assert_eq!(Color::from_hex("#11182780").unwrap().to_rgba8().3, 128);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn test_parse_functional_and_keywords() {
        let c = Color::parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(c.to_rgba8(), (255, 0, 0, 128));
        assert_eq!(Color::parse("RGB(0,0,0)"), Some(Color::BLACK));
        assert!(Color::parse("transparent").unwrap().is_transparent());
        assert_eq!(Color::parse("rgb(300, 0, 0)"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(Color::parse("red").unwrap().to_hex(), "#FF0000");
        assert_eq!(Color::parse("LightGray").unwrap().to_hex(), "#D3D3D3");
        assert_eq!(Color::parse("gray").unwrap().to_hex(), "#808080");
        assert_eq!(Color::parse("papayawhip").unwrap().to_hex(), "#FFEFD5");
        assert!(!Color::parse("red").unwrap().is_transparent());
    }

    #[test]
    fn test_hex_rejects_sign_prefix() {
        assert_eq!(Color::from_hex("#+fffff"), None);
        assert_eq!(Color::from_hex("+ff"), None);
        assert_eq!(Color::parse("#+fffff"), None);
    }

    #[test]
    fn test_from_str_reports_invalid_color() {
        let err = "not-a-color".parse::<Color>().unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(Color::WHITE.relative_luminance() > 0.99);
        assert!(Color::BLACK.relative_luminance() < 0.01);
        assert!(Color::from_hex("#111827").unwrap().relative_luminance() < 0.05);
    }

    #[test]
    fn test_geometry_helpers() {
        let g = Geometry::new(10.0, 20.0, 160.0, 48.0);
        assert!((g.aspect_ratio().unwrap() - 3.333).abs() < 0.01);
        assert_eq!(Geometry::new(0.0, 0.0, 10.0, 0.0).aspect_ratio(), None);

        let u = g.union(&Geometry::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!((u.x, u.y, u.right(), u.bottom()), (0.0, 0.0, 170.0, 68.0));
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!(NodeKind::from_object_type("rect"), NodeKind::Rectangle);
        assert_eq!(NodeKind::from_object_type("i-text"), NodeKind::Text);
        assert_eq!(NodeKind::from_object_type("circle"), NodeKind::Ellipse);
        assert_eq!(NodeKind::from_object_type("path"), NodeKind::Rectangle);
    }
}
