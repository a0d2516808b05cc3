//! Post-classification rewrites of the component tree.

use crate::model::{ComponentId, ComponentMapping, ComponentType, Props};

/// Rewrites top-level components before code is emitted.
pub trait TreeOptimizer: Send + Sync {
    fn optimize(&self, components: Vec<ComponentMapping>) -> Vec<ComponentMapping>;
}

/// Leaves the tree as classified.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOptimizer;

impl TreeOptimizer for IdentityOptimizer {
    fn optimize(&self, components: Vec<ComponentMapping>) -> Vec<ComponentMapping> {
        components
    }
}

/// Wraps runs of horizontally aligned top-level components in a row
/// container.
///
/// Two neighbours share a row when their vertical centers differ by at most
/// `tolerance` from the first component of the run. Children of a row are
/// ordered left to right. Row containers get fresh ids after every existing
/// one and have no provenance of their own.
#[derive(Debug, Clone, Copy)]
pub struct RowGroupingOptimizer {
    tolerance: f64,
}

impl RowGroupingOptimizer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl TreeOptimizer for RowGroupingOptimizer {
    fn optimize(&self, components: Vec<ComponentMapping>) -> Vec<ComponentMapping> {
        let mut next_id = components
            .iter()
            .map(|c| c.max_id().0 + 1)
            .max()
            .unwrap_or(0);
        let mut out = Vec::with_capacity(components.len());
        let mut run: Vec<ComponentMapping> = Vec::new();

        for component in components {
            let aligned = run.first().is_some_and(|first| {
                (first.bounds.center_y() - component.bounds.center_y()).abs() <= self.tolerance
            });
            if !aligned {
                flush_row(&mut run, &mut out, &mut next_id);
            }
            run.push(component);
        }
        flush_row(&mut run, &mut out, &mut next_id);
        out
    }
}

fn flush_row(run: &mut Vec<ComponentMapping>, out: &mut Vec<ComponentMapping>, next_id: &mut u32) {
    if run.len() < 2 {
        out.append(run);
        return;
    }

    let mut items = std::mem::take(run);
    items.sort_by(|a, b| a.bounds.x.total_cmp(&b.bounds.x));
    let bounds = items[1..]
        .iter()
        .fold(items[0].bounds, |acc, c| acc.union(&c.bounds));

    let mut props = Props::new();
    props.insert("layout".into(), "row".into());
    let id = ComponentId(*next_id);
    *next_id += 1;
    tracing::debug!(component = %id, members = items.len(), "grouped row");

    out.push(ComponentMapping::new(id, ComponentType::Container, props, bounds, Vec::new()).with_children(items));
}
