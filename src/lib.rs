//! # collab-analytics — Collaboration Analytics Engine
//!
//! Pure computations that turn one week's flat list of per-member work
//! items into a directed collaboration graph and derive bottleneck
//! intensity, a domain × domain collaboration matrix, per-member summary
//! scores, cross-week trend/anomaly detection, and short natural-language
//! insights.
//!
//! ## Design Principles
//!
//! 1. **Pure functions over immutable input**: every analyzer recomputes
//!    from the caller-supplied item slice — no caching, no incremental
//!    state. Same input, same output, always.
//! 2. **Edges are one-sided facts**: the graph is a flat append-only edge
//!    list; `pre`/`post` declarations are never reconciled into a
//!    bidirectional structure, and each consumer folds over the list
//!    independently.
//! 3. **Never throw on malformed domain data**: blank domains become
//!    `"unknown"`, unknown relation tags are skipped, empty input yields
//!    empty output. Errors exist only at the typed parse boundary.
//! 4. **Plain data across the boundary**: inputs and outputs are serde
//!    DTOs with no framework types, ready for a JSON API or UI layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use collab_analytics::{Collaborator, Relation, WeekAnalysis, WorkItem};
//!
//! let items = vec![
//!     WorkItem::new("Ada", "BE")
//!         .with_collaborator(Collaborator::new("Bea", Relation::Pre)),
//!     WorkItem::new("Bea", "FE"),
//! ];
//!
//! let week = WeekAnalysis::new(&items);
//! let bottlenecks = week.bottlenecks();
//! assert_eq!(bottlenecks[0].name, "Bea"); // Ada waits on Bea
//! assert_eq!(bottlenecks[0].waiters, vec!["Ada".to_owned()]);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod bottleneck;
pub mod graph;
pub mod insight;
pub mod matrix;
pub mod model;
pub mod summary;
pub mod trend;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Collaborator, Relation, RiskLevel, WeekSnapshot, WorkItem};

// ============================================================================
// Re-exports: Analyzers
// ============================================================================

pub use bottleneck::{BottleneckNode, IntensityBand, bottleneck_nodes};
pub use graph::{CollabGraph, Edge, UNKNOWN_DOMAIN, build_graph};
pub use insight::{
    Insight, InsightKind, PreviousWeek, generate_personal_insights, generate_team_insights,
    sort_for_display,
};
pub use matrix::{MatrixCell, RelationFilter, collaboration_matrix};
pub use summary::{MemberRadar, MemberSummary, member_summary, radar_axes};
pub use trend::{
    AnomalyWeek, TrendDelta, TrendReport, WeeklyLoad, detect_bottleneck_trend, weekly_loads,
};

// ============================================================================
// Top-level WeekAnalysis handle
// ============================================================================

use graph::WeekIndex;

/// One week's analytics, computed off a single graph snapshot.
///
/// The free functions each rebuild the graph per call; this handle builds
/// it once and serves every view from the same immutable edge set. Results
/// are identical either way — the analyzers are pure folds over the edges.
pub struct WeekAnalysis {
    graph: CollabGraph,
    index: WeekIndex,
}

impl WeekAnalysis {
    pub fn new(items: &[WorkItem]) -> Self {
        Self {
            graph: graph::build_graph(items),
            index: WeekIndex::build(items),
        }
    }

    /// The underlying edge set.
    pub fn graph(&self) -> &CollabGraph {
        &self.graph
    }

    /// Wait-graph bottleneck ranking, intensity descending.
    pub fn bottlenecks(&self) -> Vec<BottleneckNode> {
        bottleneck::bottlenecks_from(&self.graph, &self.index)
    }

    /// Domain × domain collaboration grid.
    pub fn matrix(&self, filter: RelationFilter) -> Vec<MatrixCell> {
        matrix::matrix_from(&self.graph, &self.index, filter)
    }

    /// One member's raw counts and percentage scores.
    pub fn member_summary(&self, member_name: &str) -> MemberSummary {
        summary::summary_from(&self.graph, &self.index, member_name)
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Failures at the engine's typed boundary.
///
/// Malformed domain data never reaches these: inside a computation, bad
/// entries degrade to zero contribution instead. "Failure" here only ever
/// means "this one input could not be classified".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown relation kind '{kind}' (expected pair, pre, or post)")]
    UnknownRelationKind { kind: String },

    #[error("non-finite or negative value for {context}: {value}")]
    NonFiniteInput { context: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
