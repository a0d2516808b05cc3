//! Application document and project skeleton.

use super::templates::TemplateEngine;
use crate::error::Result;
use crate::model::ComponentMapping;
use serde_json::json;

const DOCUMENT_TEMPLATE: &str = r#"import React from 'react';

export default function {{pascal_case name}}() {
  return (
    <div className="min-h-screen bg-white">
{{indent body 6}}
    </div>
  );
}
"#;

const MANIFEST_TEMPLATE: &str = r#"{
  "name": "{{kebab_case name}}",
  "private": true,
  "version": "0.1.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "preview": "vite preview"
  },
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  },
  "devDependencies": {
    "@vitejs/plugin-react": "^4.2.1",
    "autoprefixer": "^10.4.17",
    "postcss": "^8.4.35",
    "tailwindcss": "^3.4.1",
    "vite": "^5.1.0"
  }
}
"#;

const TAILWIND_CONFIG: &str = r#"/** @type {import('tailwindcss').Config} */
export default {
  content: ['./index.html', './src/**/*.{js,jsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
};
"#;

/// Options for project generation.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Project name, written kebab-cased into the manifest.
    pub name: String,
    /// Exported component name, also the document file stem.
    pub component_name: String,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            name: "sketch-app".to_string(),
            component_name: "App".to_string(),
        }
    }
}

/// Generated project output. Nothing is written to disk.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the project root.
    pub path: String,
    pub content: String,
}

/// Renders the application document and its project skeleton.
pub struct ProjectScaffold {
    engine: TemplateEngine<'static>,
}

impl ProjectScaffold {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }

    /// Wrap top-level component code, in order, in one module exporting
    /// `component_name`.
    pub fn render_document(&self, component_name: &str, components: &[ComponentMapping]) -> Result<String> {
        let body = components
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.engine
            .render_string(DOCUMENT_TEMPLATE, &json!({ "name": component_name, "body": body }))
    }

    /// Manifest, style configuration and the document itself.
    pub fn generate(&self, options: &ProjectOptions, document: String) -> Result<GeneratedProject> {
        let manifest = self
            .engine
            .render_string(MANIFEST_TEMPLATE, &json!({ "name": options.name }))?;
        let component = self
            .engine
            .render_string("{{pascal_case name}}", &json!({ "name": options.component_name }))?;

        tracing::debug!(project = %options.name, component = %component, "generating project");
        Ok(GeneratedProject {
            files: vec![
                GeneratedFile {
                    path: "package.json".to_string(),
                    content: manifest,
                },
                GeneratedFile {
                    path: "tailwind.config.js".to_string(),
                    content: TAILWIND_CONFIG.to_string(),
                },
                GeneratedFile {
                    path: format!("src/{component}.jsx"),
                    content: document,
                },
            ],
        })
    }
}

impl Default for ProjectScaffold {
    fn default() -> Self {
        Self::new()
    }
}
