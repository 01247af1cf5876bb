//! Directed collaboration multigraph construction.
//!
//! Scans one week's work items and materializes the edge set every other
//! analyzer folds over. Rebuilt fresh on every call — same input slice,
//! same graph, no caching, no incremental update.

use std::collections::BTreeSet;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Relation, WorkItem};

/// Domain assigned when an item leaves it blank or a collaborator never
/// owns an item that week. Excluded from matrix aggregation, still counted
/// in bottleneck aggregation.
pub const UNKNOWN_DOMAIN: &str = "unknown";

// ============================================================================
// Edge / CollabGraph
// ============================================================================

/// One declared relation instance, oriented per [`Relation`] semantics.
///
/// For `Pre`, `from → to` reads "`from` waits on `to`". Edges are never
/// deduplicated: two items by the same owner naming the same collaborator
/// with the same relation contribute two edge instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: Relation,
    /// The declaring item's domain.
    pub domain_from: String,
    /// The collaborator's domain, resolved from any item they own this
    /// week; [`UNKNOWN_DOMAIN`] when they own none.
    pub domain_to: String,
}

/// The week's collaboration multigraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollabGraph {
    /// Every name that owns an item or is named as a collaborator —
    /// including pure wait-targets that report nothing themselves.
    pub nodes: HashSet<String>,
    pub edges: Vec<Edge>,
}

impl CollabGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges of one relation kind.
    pub fn edges_of(&self, kind: Relation) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Build the week's multigraph from a flat item list.
///
/// One edge per (item, collaborator, effective relation) triple. Symmetry
/// is never assumed: a `pre` declared by A and a `post` declared by B are
/// independent one-sided facts and both land in the edge list. Self-edges
/// (a member naming themselves) are emitted as-is; consumers decide whether
/// to ignore them.
pub fn build_graph(items: &[WorkItem]) -> CollabGraph {
    let index = WeekIndex::build(items);
    let mut nodes = HashSet::new();
    let mut edges = Vec::new();

    for item in items {
        nodes.insert(item.name.clone());
        let domain_from = domain_or_unknown(&item.domain);

        for collab in &item.collaborators {
            nodes.insert(collab.name.clone());
            let domain_to = index.domain_of(&collab.name);

            for kind in collab.effective_relations() {
                edges.push(Edge {
                    from: item.name.clone(),
                    to: collab.name.clone(),
                    kind,
                    domain_from: domain_from.to_owned(),
                    domain_to: domain_to.to_owned(),
                });
            }
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "collaboration graph built"
    );
    CollabGraph { nodes, edges }
}

pub(crate) fn domain_or_unknown(domain: &str) -> &str {
    if domain.trim().is_empty() {
        UNKNOWN_DOMAIN
    } else {
        domain
    }
}

// ============================================================================
// WeekIndex — per-call lookup tables
// ============================================================================

/// Name → domain/module lookups over one week's items, built once per call
/// before edge construction so collaborator resolution is O(1) instead of a
/// rescan per entry. An index, not a cache: rebuilt fresh every call.
#[derive(Debug, Clone)]
pub(crate) struct WeekIndex {
    /// Owner name → domain, first owned item wins. Blank domains map to
    /// [`UNKNOWN_DOMAIN`].
    domains: HashMap<String, String>,
    /// Owner name → module, first owned item that declares one wins.
    modules: HashMap<String, String>,
    /// Distinct owner domains excluding [`UNKNOWN_DOMAIN`], sorted. These
    /// are the matrix axes.
    matrix_domains: BTreeSet<String>,
    /// Distinct owner names, sorted.
    owners: BTreeSet<String>,
}

impl WeekIndex {
    pub(crate) fn build(items: &[WorkItem]) -> Self {
        let mut domains = HashMap::new();
        let mut modules = HashMap::new();
        let mut matrix_domains = BTreeSet::new();
        let mut owners = BTreeSet::new();

        for item in items {
            let domain = domain_or_unknown(&item.domain);
            domains
                .entry(item.name.clone())
                .or_insert_with(|| domain.to_owned());
            if let Some(module) = &item.module {
                modules
                    .entry(item.name.clone())
                    .or_insert_with(|| module.clone());
            }
            if domain != UNKNOWN_DOMAIN {
                matrix_domains.insert(domain.to_owned());
            }
            owners.insert(item.name.clone());
        }

        Self {
            domains,
            modules,
            matrix_domains,
            owners,
        }
    }

    /// Domain for a name, [`UNKNOWN_DOMAIN`] when the name owns no item.
    pub(crate) fn domain_of(&self, name: &str) -> &str {
        self.domains.get(name).map_or(UNKNOWN_DOMAIN, String::as_str)
    }

    /// Module for a name, absent when the name owns no item declaring one.
    pub(crate) fn module_of(&self, name: &str) -> Option<&str> {
        self.modules.get(name).map(String::as_str)
    }

    pub(crate) fn matrix_domains(&self) -> &BTreeSet<String> {
        &self.matrix_domains
    }

    pub(crate) fn owners(&self) -> &BTreeSet<String> {
        &self.owners
    }
}
