//! Infer UI components from a design canvas and emit React code.
//!
//! A scene graph read by `sketch-core` is classified node by node into
//! buttons, inputs, cards, navbars and generic elements. Each component is
//! rendered as JSX with Tailwind classes, and the whole page can be wrapped
//! in an application document or a minimal project skeleton.
//!
//! # Example
//!
//! ```ignore
//! use sketch_codegen::DesignAnalyzer;
//! use sketch_core::SceneGraph;
//!
//! let graph = SceneGraph::from_json(canvas_json)?;
//! let analyzer = DesignAnalyzer::new();
//! for component in analyzer.analyze(&graph) {
//!     println!("{}", component.code);
//! }
//! let app = analyzer.generate_application(&graph)?;
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod optimizer;

pub use analyzer::{
    Analysis, AnalysisContext, AnalysisOptions, CancellationToken, ClaimIndex, DesignAnalyzer,
    InputType, PatternStrategy, Progress, SpatialIndex,
};
pub use config::AnalyzerConfig;
pub use error::{CodegenError, Result};
pub use generators::{
    CodeEmitter, GeneratedFile, GeneratedProject, ProjectOptions, ProjectScaffold, ReactEmitter,
    TemplateEngine,
};
pub use model::{ComponentId, ComponentMapping, ComponentType, PropValue, Props};
pub use optimizer::{IdentityOptimizer, RowGroupingOptimizer, TreeOptimizer};
