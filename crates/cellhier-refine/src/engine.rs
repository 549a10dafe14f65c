//! HierarchyRefiner: runs ontology construction and every refinement pass in order.
//!
//! `Built → {Reorganizing ⇄ Merging} → Collapsing → Cleaned → Exported`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cellhier_core::config::{HierarchyConfig, RefinerConfig};
use cellhier_core::constants;
use cellhier_core::errors::{CellhierResult, ConfigError, HierarchyError};
use cellhier_core::models::{EdgeRow, TermRow};
use cellhier_tables::{read_edges, read_nodes, write_tables};

use crate::export::{HierarchyExporter, RefinedHierarchy};
use crate::graph::HierarchyGraph;
use crate::ontology::OntologyBuilder;
use crate::passes::{
    ContainmentReorganizer, ParentChildMerger, RedundancyCollapser, ShortcutRemover,
};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RefinementStage {
    Built,
    Reorganizing,
    Merging,
    Collapsing,
    Cleaned,
    Exported,
}

/// Counts of what the passes changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementReport {
    /// Reorganize/merge rounds, including the last one that changed nothing.
    pub rounds: usize,
    pub edges_added: usize,
    pub terms_merged: usize,
    pub terms_collapsed: usize,
    pub shortcuts_removed: usize,
}

#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    pub hierarchy: RefinedHierarchy,
    pub report: RefinementReport,
    pub stage: RefinementStage,
}

/// Refines one community-detection hierarchy with a fixed configuration.
#[derive(Debug, Clone)]
pub struct HierarchyRefiner {
    config: RefinerConfig,
}

impl HierarchyRefiner {
    /// Fails with `ConfigError::ValidationFailed` if a threshold is outside
    /// `(0, 1]`, `min_term_size` is zero, or `min_diff` is negative.
    pub fn new(config: RefinerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_config(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        Self::new(config.refiner.clone())
    }

    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    /// Build and refine the hierarchy described by `terms` and `edges`.
    pub fn refine(
        &self,
        terms: &[TermRow],
        edges: &[EdgeRow],
    ) -> Result<RefinementOutcome, HierarchyError> {
        let span = tracing::info_span!("refine", terms = terms.len(), edges = edges.len());
        let _enter = span.enter();
        tracing::debug!(
            containment_threshold = self.config.containment_threshold,
            jaccard_threshold = self.config.jaccard_threshold,
            min_term_size = self.config.min_term_size,
            min_diff = self.config.min_diff,
            "refiner configuration"
        );

        let mut graph = OntologyBuilder::new(self.config.min_term_size).build(terms, edges)?;
        let mut stage = RefinementStage::Built;
        let mut report = RefinementReport::default();

        self.reach_fixed_point(&mut graph, &mut report, &mut stage)?;

        stage = advance(stage, RefinementStage::Collapsing);
        let collapsed = RedundancyCollapser::new(self.config.min_diff).run(&mut graph)?;
        report.terms_collapsed = collapsed.terms_collapsed;

        stage = advance(stage, RefinementStage::Cleaned);
        report.shortcuts_removed += ShortcutRemover.run(&mut graph);

        let hierarchy = HierarchyExporter.export(&graph, terms)?;
        stage = advance(stage, RefinementStage::Exported);

        tracing::info!(
            terms = hierarchy.nodes.len(),
            edges = hierarchy.edges.len(),
            rounds = report.rounds,
            edges_added = report.edges_added,
            terms_merged = report.terms_merged,
            terms_collapsed = report.terms_collapsed,
            shortcuts_removed = report.shortcuts_removed,
            "hierarchy refined"
        );
        Ok(RefinementOutcome {
            hierarchy,
            report,
            stage,
        })
    }

    /// Alternate reorganizing and merging until a round changes nothing.
    fn reach_fixed_point(
        &self,
        graph: &mut HierarchyGraph,
        report: &mut RefinementReport,
        stage: &mut RefinementStage,
    ) -> Result<(), HierarchyError> {
        let reorganizer = ContainmentReorganizer::new(self.config.containment_threshold);
        let merger = ParentChildMerger::new(self.config.jaccard_threshold);
        loop {
            report.rounds += 1;

            *stage = advance(*stage, RefinementStage::Reorganizing);
            let reorganized = reorganizer.run(graph)?;
            report.edges_added += reorganized.edges_added;
            report.shortcuts_removed += reorganized.shortcuts_removed;

            *stage = advance(*stage, RefinementStage::Merging);
            let merged = merger.run(graph)?;
            report.terms_merged += merged.terms_merged;
            report.shortcuts_removed += merged.shortcuts_removed;

            tracing::debug!(
                round = report.rounds,
                modified = reorganized.modified,
                merged = merged.merged,
                "refinement round finished"
            );
            if !reorganized.modified && !merged.merged {
                return Ok(());
            }
        }
    }

    /// Refine `<prefix>.nodes` / `<prefix>.edges` and write
    /// `<prefix>.pruned.nodes` / `<prefix>.pruned.edges`.
    ///
    /// Nothing is written unless refinement succeeds.
    pub fn refine_files(&self, prefix: &Path) -> CellhierResult<RefinementOutcome> {
        let terms = read_nodes(&with_suffix(prefix, constants::NODES_SUFFIX))?;
        let edges = read_edges(&with_suffix(prefix, constants::EDGES_SUFFIX))?;

        let outcome = self.refine(&terms, &edges)?;

        write_tables(
            &with_suffix(prefix, constants::PRUNED_NODES_SUFFIX),
            &outcome.hierarchy.nodes,
            &with_suffix(prefix, constants::PRUNED_EDGES_SUFFIX),
            &outcome.hierarchy.edges,
        )?;
        Ok(outcome)
    }
}

fn advance(from: RefinementStage, to: RefinementStage) -> RefinementStage {
    if from != to {
        tracing::debug!(?from, ?to, "stage transition");
    }
    to
}

/// `prefix` with `suffix` appended to its final component.
pub fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}
