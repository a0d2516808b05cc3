//! Template engine for document and project files.

use crate::error::{CodegenError, Result};
use convert_case::{Case, Casing};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

handlebars_helper!(pascal_case: |s: str| s.to_case(Case::Pascal));
handlebars_helper!(kebab_case: |s: str| s.to_case(Case::Kebab));
handlebars_helper!(indent: |content: str, spaces: u64| indent_lines(content, spaces as usize));

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled. Callers escape
/// user text before it reaches a template.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("pascal_case", Box::new(pascal_case));
        handlebars.register_helper("kebab_case", Box::new(kebab_case));
        handlebars.register_helper("indent", Box::new(indent));
        Self { handlebars }
    }

    /// Register a named template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }
}

impl Default for TemplateEngine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix every non-blank line with `spaces` spaces.
pub fn indent_lines(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
