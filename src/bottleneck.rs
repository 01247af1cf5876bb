//! Wait-graph bottleneck analysis.
//!
//! Folds over the week's `pre` edges to score every member as a potential
//! chokepoint: how many people wait on them (inbound), how many they wait
//! on (outbound), and a 0–100 intensity normalized against the week's
//! maximum inbound count.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::graph::{CollabGraph, WeekIndex, build_graph};
use crate::model::{Relation, WorkItem};

// ============================================================================
// Intensity bands
// ============================================================================

/// Fixed display thresholds over bottleneck intensity.
///
/// These are a contract shared by every consumer (coloring, insights) and
/// must be read from here, never re-derived: ≥80 critical, ≥50 warning,
/// ≥20 caution, else normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityBand {
    Critical,
    Warning,
    Caution,
    Normal,
}

impl IntensityBand {
    pub fn of(intensity: u8) -> Self {
        match intensity {
            80.. => IntensityBand::Critical,
            50..=79 => IntensityBand::Warning,
            20..=49 => IntensityBand::Caution,
            _ => IntensityBand::Normal,
        }
    }
}

// ============================================================================
// BottleneckNode
// ============================================================================

/// One member's wait-graph position for the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottleneckNode {
    pub name: String,
    pub domain: String,
    /// `pre` edges pointing at this node: people waiting on them. The
    /// bottleneck-relevant count.
    pub inbound_count: usize,
    /// `pre` edges leaving this node: people this node waits on.
    pub outbound_count: usize,
    /// `round(100 · inbound / max inbound across the week)`; all zero when
    /// nobody has inbound load.
    pub intensity: u8,
    /// Distinct members waiting on this node, sorted.
    pub waiters: Vec<String>,
    /// Distinct members this node waits on, sorted.
    pub blocking: Vec<String>,
}

impl BottleneckNode {
    pub fn band(&self) -> IntensityBand {
        IntensityBand::of(self.intensity)
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Rank the week's members by wait-graph load.
///
/// Only nodes with at least one inbound or outbound `pre` edge are
/// returned, sorted by intensity descending (ties: inbound descending,
/// then name). Self-edges are excluded from all bottleneck aggregation.
pub fn bottleneck_nodes(items: &[WorkItem]) -> Vec<BottleneckNode> {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);
    bottlenecks_from(&graph, &index)
}

#[derive(Default)]
struct WaitCounts {
    inbound: usize,
    outbound: usize,
    waiters: BTreeSet<String>,
    blocking: BTreeSet<String>,
}

pub(crate) fn bottlenecks_from(graph: &CollabGraph, index: &WeekIndex) -> Vec<BottleneckNode> {
    let mut counts: HashMap<&str, WaitCounts> = HashMap::new();

    for edge in graph.edges_of(Relation::Pre) {
        if edge.from == edge.to {
            continue;
        }
        let from = counts.entry(edge.from.as_str()).or_default();
        from.outbound += 1;
        from.blocking.insert(edge.to.clone());

        let to = counts.entry(edge.to.as_str()).or_default();
        to.inbound += 1;
        to.waiters.insert(edge.from.clone());
    }

    let max_inbound = counts.values().map(|c| c.inbound).max().unwrap_or(0);

    let mut nodes: Vec<BottleneckNode> = counts
        .into_iter()
        .filter(|(_, c)| c.inbound > 0 || c.outbound > 0)
        .map(|(name, c)| BottleneckNode {
            name: name.to_owned(),
            domain: index.domain_of(name).to_owned(),
            inbound_count: c.inbound,
            outbound_count: c.outbound,
            intensity: intensity(c.inbound, max_inbound),
            waiters: c.waiters.into_iter().collect(),
            blocking: c.blocking.into_iter().collect(),
        })
        .collect();

    nodes.sort_by(|a, b| {
        b.intensity
            .cmp(&a.intensity)
            .then(b.inbound_count.cmp(&a.inbound_count))
            .then(a.name.cmp(&b.name))
    });
    nodes
}

fn intensity(inbound: usize, max_inbound: usize) -> u8 {
    if max_inbound == 0 {
        return 0;
    }
    (100.0 * inbound as f64 / max_inbound as f64).round() as u8
}
