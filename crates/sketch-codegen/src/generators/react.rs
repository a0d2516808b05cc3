//! React (JSX + Tailwind) templates, one per component type.
//!
//! Every template is a pure function of its props and already-rendered
//! children. Text and attribute values are escaped for JSX.

use crate::analyzer::synthesizer::{
    DEFAULT_BRAND, DEFAULT_BUTTON_LABEL, DEFAULT_CARD_TITLE, DEFAULT_INPUT_PLACEHOLDER,
};
use crate::model::{ComponentMapping, ComponentType, PropValue, Props};
use super::templates::indent_lines;

const INPUT_CLASSES: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-gray-900";
const TEXT_TAGS: [&str; 5] = ["h1", "h2", "h3", "strong", "p"];

/// Renders code for a component mapping tree.
pub trait CodeEmitter: Send + Sync {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Code for one component given its children's code.
    fn render(&self, component_type: ComponentType, props: &Props, children: &[String]) -> String;

    /// Fill `code` bottom-up for `mapping` and all its descendants.
    fn emit_tree(&self, mut mapping: ComponentMapping) -> ComponentMapping {
        mapping.children = std::mem::take(&mut mapping.children)
            .into_iter()
            .map(|child| self.emit_tree(child))
            .collect();
        let child_code: Vec<String> = mapping.children.iter().map(|c| c.code.clone()).collect();
        mapping.code = self.render(mapping.component_type, &mapping.props, &child_code);
        mapping
    }
}

/// JSX with Tailwind utility classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactEmitter;

impl CodeEmitter for ReactEmitter {
    fn framework_name(&self) -> &'static str {
        "react"
    }

    fn render(&self, component_type: ComponentType, props: &Props, children: &[String]) -> String {
        match component_type {
            ComponentType::Button => button(props),
            ComponentType::Input => input(props),
            ComponentType::Card => card(props),
            ComponentType::Navbar => navbar(props),
            ComponentType::Text => text(props),
            ComponentType::Image => image(props),
            ComponentType::Container => container(props, children),
        }
    }
}

pub fn button(props: &Props) -> String {
    let label = escape_text(str_prop(props, "label").unwrap_or(DEFAULT_BUTTON_LABEL));
    let classes = match str_prop(props, "variant") {
        Some("primary") => "px-4 py-2 rounded-md bg-gray-900 text-white font-medium hover:bg-gray-800".to_string(),
        Some("outline") => {
            "px-4 py-2 rounded-md border border-gray-300 text-gray-900 font-medium hover:bg-gray-50".to_string()
        }
        _ => match str_prop(props, "background") {
            Some(bg) => format!(
                "px-4 py-2 rounded-md bg-[{}] text-gray-900 font-medium hover:opacity-90",
                escape_attr(bg)
            ),
            None => "px-4 py-2 rounded-md bg-gray-100 text-gray-900 font-medium hover:bg-gray-200".to_string(),
        },
    };
    format!(r#"<button type="button" className="{classes}">{label}</button>"#)
}

pub fn input(props: &Props) -> String {
    let input_type = escape_attr(str_prop(props, "type").unwrap_or("text"));
    let placeholder = escape_attr(str_prop(props, "placeholder").unwrap_or(DEFAULT_INPUT_PLACEHOLDER));
    let aria = str_prop(props, "label")
        .map(|label| format!(r#" aria-label="{}""#, escape_attr(label)))
        .unwrap_or_default();
    format!(r#"<input type="{input_type}" placeholder="{placeholder}"{aria} className="{INPUT_CLASSES}" />"#)
}

pub fn card(props: &Props) -> String {
    let mut lines = vec![r#"<div className="rounded-lg border border-gray-200 bg-white shadow-sm overflow-hidden">"#.to_string()];
    if let Some(src) = str_prop(props, "image") {
        lines.push(format!(
            r#"  <img src="{}" alt="" className="w-full h-48 object-cover" />"#,
            escape_attr(src)
        ));
    }
    lines.push(r#"  <div className="p-6">"#.to_string());
    lines.push(format!(
        r#"    <h3 className="text-lg font-semibold text-gray-900">{}</h3>"#,
        escape_text(str_prop(props, "title").unwrap_or(DEFAULT_CARD_TITLE))
    ));
    if let Some(description) = str_prop(props, "description") {
        lines.push(format!(
            r#"    <p className="mt-2 text-sm text-gray-600">{}</p>"#,
            escape_text(description)
        ));
    }
    lines.push("  </div>".to_string());
    lines.push("</div>".to_string());
    lines.join("\n")
}

pub fn navbar(props: &Props) -> String {
    let brand = escape_text(str_prop(props, "brand").unwrap_or(DEFAULT_BRAND));
    let items = props.get("items").and_then(PropValue::as_list).unwrap_or(&[]);

    let mut lines = vec![
        r#"<nav className="flex items-center justify-between px-6 py-4 bg-white border-b border-gray-200">"#.to_string(),
        format!(r#"  <span className="text-xl font-bold text-gray-900">{brand}</span>"#),
        r#"  <ul className="flex gap-6">"#.to_string(),
    ];
    for item in items {
        lines.push(format!(
            r##"    <li><a href="#" className="text-gray-600 hover:text-gray-900">{}</a></li>"##,
            escape_text(item)
        ));
    }
    lines.push("  </ul>".to_string());
    lines.push("</nav>".to_string());
    lines.join("\n")
}

pub fn text(props: &Props) -> String {
    let tag = str_prop(props, "tag")
        .filter(|t| TEXT_TAGS.iter().any(|known| known == t))
        .unwrap_or("p");
    let classes = match tag {
        "h1" => "text-4xl font-bold text-gray-900",
        "h2" => "text-3xl font-bold text-gray-900",
        "h3" => "text-2xl font-semibold text-gray-900",
        "strong" => "font-semibold text-gray-900",
        _ => "text-base text-gray-700",
    };
    let content = escape_text(str_prop(props, "content").unwrap_or_default());
    format!(r#"<{tag} className="{classes}">{content}</{tag}>"#)
}

pub fn image(props: &Props) -> String {
    let src = escape_attr(str_prop(props, "src").unwrap_or_default());
    format!(
        r#"<img src="{src}" alt="" className="w-[{}px] h-[{}px] object-cover" />"#,
        px(num_prop(props, "width")),
        px(num_prop(props, "height"))
    )
}

pub fn container(props: &Props, children: &[String]) -> String {
    let mut classes = Vec::new();
    match str_prop(props, "layout") {
        Some("row") => classes.push("flex flex-row items-center gap-4".to_string()),
        Some("column") => classes.push("flex flex-col gap-4".to_string()),
        _ => {}
    }
    if str_prop(props, "shape") == Some("ellipse") {
        classes.push("rounded-full".to_string());
    }
    let width = num_prop(props, "width");
    if width > 0.0 {
        classes.push(format!("w-[{}px]", px(width)));
    }
    let height = num_prop(props, "height");
    if height > 0.0 {
        classes.push(format!("h-[{}px]", px(height)));
    }
    if let Some(bg) = str_prop(props, "background") {
        classes.push(format!("bg-[{}]", escape_attr(bg)));
    }

    let open = if classes.is_empty() {
        "<div".to_string()
    } else {
        format!(r#"<div className="{}""#, classes.join(" "))
    };
    if children.is_empty() {
        return format!("{open} />");
    }

    let mut lines = vec![format!("{open}>")];
    lines.extend(children.iter().map(|child| indent_lines(child, 2)));
    lines.push("</div>".to_string());
    lines.join("\n")
}

/// Escape text placed between JSX tags. Line breaks become `<br />`.
pub fn escape_text(s: &str) -> String {
    s.lines()
        .map(|line| {
            let mut out = String::with_capacity(line.len());
            for ch in line.chars() {
                match ch {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '{' => out.push_str("{'{'}"),
                    '}' => out.push_str("{'}'}"),
                    _ => out.push(ch),
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("<br />")
}

/// Escape a double-quoted JSX attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

fn str_prop<'p>(props: &'p Props, key: &str) -> Option<&'p str> {
    props.get(key).and_then(PropValue::as_str)
}

fn num_prop(props: &Props, key: &str) -> f64 {
    props
        .get(key)
        .and_then(PropValue::as_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Whole pixels, rounded.
fn px(n: f64) -> i64 {
    n.round() as i64
}
