//! Code emission: per-component JSX templates, the application document
//! and the project skeleton.

mod react;
mod scaffold;
mod templates;

pub use react::{escape_attr, escape_text, CodeEmitter, ReactEmitter};
pub use scaffold::{GeneratedFile, GeneratedProject, ProjectOptions, ProjectScaffold};
pub use templates::{indent_lines, TemplateEngine};
