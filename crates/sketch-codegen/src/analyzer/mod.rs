//! Design analysis: scene graph in, component mappings out.

mod claims;
mod patterns;
mod spatial;
pub mod synthesizer;

pub use claims::ClaimIndex;
pub use patterns::{
    default_strategies, ButtonPattern, CardPattern, InputPattern, NavbarPattern, PatternStrategy,
};
pub use spatial::{InputType, SpatialIndex};

use crate::config::AnalyzerConfig;
use crate::error::{CodegenError, Result};
use crate::generators::{
    CodeEmitter, GeneratedProject, ProjectOptions, ProjectScaffold, ReactEmitter,
};
use crate::model::{ComponentId, ComponentMapping};
use crate::optimizer::{IdentityOptimizer, RowGroupingOptimizer, TreeOptimizer};
use sketch_core::{SceneGraph, SceneNode};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Read-only state shared by strategies during one run.
pub struct AnalysisContext<'a> {
    pub graph: &'a SceneGraph,
    pub config: &'a AnalyzerConfig,
    pub spatial: &'a SpatialIndex<'a>,
}

/// Cooperative cancellation flag, checked between batches.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress through the top-level nodes of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

/// Controls for a batched run.
pub struct AnalysisOptions<'a> {
    /// Top-level nodes classified between cancellation checks.
    pub batch_size: usize,
    pub cancellation: Option<CancellationToken>,
    /// Called after every batch.
    pub on_progress: Option<&'a (dyn Fn(Progress) + Sync)>,
}

impl Default for AnalysisOptions<'_> {
    fn default() -> Self {
        Self {
            batch_size: 256,
            cancellation: None,
            on_progress: None,
        }
    }
}

/// Result of one complete run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub components: Vec<ComponentMapping>,
    pub claims: ClaimIndex,
}

/// Classifies scene graphs into UI components and emits code for them.
pub struct DesignAnalyzer {
    config: AnalyzerConfig,
    strategies: Vec<Box<dyn PatternStrategy>>,
    optimizer: Box<dyn TreeOptimizer>,
    emitter: Box<dyn CodeEmitter>,
    scaffold: ProjectScaffold,
}

impl DesignAnalyzer {
    /// Create an analyzer with default thresholds.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom thresholds.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let optimizer: Box<dyn TreeOptimizer> = if config.group_rows {
            Box::new(RowGroupingOptimizer::new(config.row_alignment_tolerance))
        } else {
            Box::new(IdentityOptimizer)
        };
        Self {
            config,
            strategies: default_strategies(),
            optimizer,
            emitter: Box::new(ReactEmitter),
            scaffold: ProjectScaffold::new(),
        }
    }

    /// Like [`with_config`](Self::with_config) but rejects invalid thresholds.
    pub fn try_with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Insert a strategy at `priority` (0 = checked first). Out-of-range
    /// priorities append to the end of the chain.
    pub fn with_strategy(mut self, priority: usize, strategy: Box<dyn PatternStrategy>) -> Self {
        let at = priority.min(self.strategies.len());
        self.strategies.insert(at, strategy);
        self
    }

    pub fn with_optimizer(mut self, optimizer: Box<dyn TreeOptimizer>) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_emitter(mut self, emitter: Box<dyn CodeEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Strategy names in evaluation order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Classify every top-level node of `graph`.
    pub fn analyze(&self, graph: &SceneGraph) -> Vec<ComponentMapping> {
        match self.run(graph, usize::MAX, |_| ControlFlow::Continue(())) {
            ControlFlow::Continue(analysis) => analysis.components,
            ControlFlow::Break(_) => Vec::new(),
        }
    }

    /// Batched, cancellable analysis. A cancelled run returns
    /// [`CodegenError::Cancelled`] and no partial components.
    pub fn analyze_with(&self, graph: &SceneGraph, options: &AnalysisOptions<'_>) -> Result<Analysis> {
        let cancelled = || {
            options
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
        };
        if cancelled() {
            return Err(CodegenError::Cancelled {
                processed: 0,
                total: graph.root_ids().len(),
            });
        }

        let flow = self.run(graph, options.batch_size, |progress| {
            if let Some(report) = options.on_progress {
                report(progress);
            }
            if cancelled() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        match flow {
            ControlFlow::Continue(analysis) => Ok(analysis),
            ControlFlow::Break(progress) => {
                tracing::info!(processed = progress.processed, total = progress.total, "analysis cancelled");
                Err(CodegenError::Cancelled {
                    processed: progress.processed,
                    total: progress.total,
                })
            }
        }
    }

    /// Read a serialized canvas and analyze it.
    pub fn analyze_json(&self, json: &str) -> Result<Vec<ComponentMapping>> {
        let graph = SceneGraph::from_json(json)?;
        Ok(self.analyze(&graph))
    }

    /// Emit one source document holding every top-level component in
    /// discovery order.
    pub fn generate_application(&self, graph: &SceneGraph) -> Result<String> {
        let components = self.analyze(graph);
        self.scaffold
            .render_document(&ProjectOptions::default().component_name, &components)
    }

    /// Emit a minimal project skeleton around the generated document.
    pub fn generate_project(
        &self,
        graph: &SceneGraph,
        options: &ProjectOptions,
    ) -> Result<GeneratedProject> {
        let components = self.analyze(graph);
        let document = self
            .scaffold
            .render_document(&options.component_name, &components)?;
        self.scaffold.generate(options, document)
    }

    fn run(
        &self,
        graph: &SceneGraph,
        batch_size: usize,
        mut after_batch: impl FnMut(Progress) -> ControlFlow<()>,
    ) -> ControlFlow<Progress, Analysis> {
        let spatial = SpatialIndex::new(graph, &self.config);
        let ctx = AnalysisContext {
            graph,
            config: &self.config,
            spatial: &spatial,
        };
        let mut claims = ClaimIndex::new(graph.len());
        let mut next_id = 0u32;
        let mut components = Vec::new();

        let roots = graph.root_ids();
        let mut processed = 0;
        for batch in roots.chunks(batch_size.max(1)) {
            for node in batch.iter().filter_map(|id| graph.node(*id)) {
                if let Some(component) = self.classify(node, &ctx, &mut claims, &mut next_id) {
                    components.push(component);
                }
            }
            processed += batch.len();
            let progress = Progress {
                processed,
                total: roots.len(),
            };
            if after_batch(progress).is_break() {
                return ControlFlow::Break(progress);
            }
        }

        let components: Vec<_> = self
            .optimizer
            .optimize(components)
            .into_iter()
            .map(|c| self.emitter.emit_tree(c))
            .collect();

        tracing::info!(
            nodes = graph.len(),
            roots = roots.len(),
            components = components.len(),
            "analysis complete"
        );
        ControlFlow::Continue(Analysis { components, claims })
    }

    /// Classify one unclaimed node through the strategy chain, falling back
    /// to the generic classifier.
    fn classify(
        &self,
        node: &SceneNode,
        ctx: &AnalysisContext<'_>,
        claims: &mut ClaimIndex,
        next_id: &mut u32,
    ) -> Option<ComponentMapping> {
        if claims.is_claimed(node.id) {
            return None;
        }

        let Some(strategy) = self.strategies.iter().find(|s| s.matches(node, ctx)) else {
            return Some(self.classify_generic(node, ctx, claims, next_id));
        };

        let id = allocate(next_id);
        let provenance = if strategy.claims_subtree() {
            claims.claim_subtree(ctx.graph, node.id, id)
        } else {
            claims.claim(node.id, id).map(|_| vec![node.id]).unwrap_or_default()
        };
        tracing::debug!(node = %node.id, component = %id, pattern = strategy.name(), "classified");

        Some(ComponentMapping::new(
            id,
            strategy.component_type(),
            strategy.synthesize(node, ctx),
            node.geometry,
            provenance,
        ))
    }

    fn classify_generic(
        &self,
        node: &SceneNode,
        ctx: &AnalysisContext<'_>,
        claims: &mut ClaimIndex,
        next_id: &mut u32,
    ) -> ComponentMapping {
        let id = allocate(next_id);
        let provenance = claims.claim(node.id, id).map(|_| vec![node.id]).unwrap_or_default();
        let (component_type, props) = synthesizer::generic(node, ctx);
        tracing::debug!(node = %node.id, component = %id, kind = node.kind.as_str(), "generic fallback");

        // Unmatched groups keep their structure: children go through the full chain.
        let children = ctx
            .graph
            .children(node.id)
            .filter_map(|child| self.classify(child, ctx, claims, next_id))
            .collect();

        ComponentMapping::new(id, component_type, props, node.geometry, provenance)
            .with_children(children)
    }
}

impl Default for DesignAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn allocate(next_id: &mut u32) -> ComponentId {
    let id = ComponentId(*next_id);
    *next_id += 1;
    id
}
