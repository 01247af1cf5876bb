//! Domain × domain collaboration matrix.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::graph::{CollabGraph, UNKNOWN_DOMAIN, WeekIndex, build_graph};
use crate::model::{Relation, WorkItem};

/// Which relation kinds feed the matrix.
///
/// `post` never does: it is the mirrored declaration of `pre` and counting
/// it would double-book collaboration intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationFilter {
    /// Pair ∪ pre.
    #[default]
    Both,
    Pair,
    Pre,
}

impl RelationFilter {
    fn matches(&self, kind: Relation) -> bool {
        match self {
            RelationFilter::Both => matches!(kind, Relation::Pair | Relation::Pre),
            RelationFilter::Pair => kind == Relation::Pair,
            RelationFilter::Pre => kind == Relation::Pre,
        }
    }
}

/// One cell of the domain × domain grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub source_domain: String,
    pub target_domain: String,
    pub total_count: usize,
}

/// Aggregate edge counts by (source domain, target domain).
///
/// The grid is complete over the observed domain set: every ordered pair of
/// domains that own items this week gets a cell, zero counts included, in
/// sorted domain order. Edges with an `"unknown"` endpoint are excluded.
/// Diagonal cells are computed — suppressing same-domain collaboration is a
/// display decision, not the engine's.
pub fn collaboration_matrix(items: &[WorkItem], filter: RelationFilter) -> Vec<MatrixCell> {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);
    matrix_from(&graph, &index, filter)
}

pub(crate) fn matrix_from(
    graph: &CollabGraph,
    index: &WeekIndex,
    filter: RelationFilter,
) -> Vec<MatrixCell> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for edge in &graph.edges {
        if !filter.matches(edge.kind) {
            continue;
        }
        if edge.domain_from == UNKNOWN_DOMAIN || edge.domain_to == UNKNOWN_DOMAIN {
            continue;
        }
        *counts
            .entry((edge.domain_from.as_str(), edge.domain_to.as_str()))
            .or_insert(0) += 1;
    }

    let domains = index.matrix_domains();
    let mut cells = Vec::with_capacity(domains.len() * domains.len());
    for source in domains {
        for target in domains {
            cells.push(MatrixCell {
                source_domain: source.clone(),
                target_domain: target.clone(),
                total_count: counts
                    .get(&(source.as_str(), target.as_str()))
                    .copied()
                    .unwrap_or(0),
            });
        }
    }
    cells
}
