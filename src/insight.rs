//! Natural-language insight generation.
//!
//! Turns the week's analytics signals into short, displayable statements.
//! Generators return the full list, sorted by severity; truncating to a
//! "top N" is the presentation layer's call.

use serde::{Deserialize, Serialize};

use crate::bottleneck::{IntensityBand, bottlenecks_from};
use crate::graph::{WeekIndex, build_graph};
use crate::matrix::{RelationFilter, matrix_from};
use crate::model::WorkItem;
use crate::summary::{MemberSummary, summary_from};

/// Outbound wait count at which "you are waiting on a lot of people"
/// becomes worth saying.
const OUTBOUND_HEAVY: usize = 3;

/// Cross-domain score at which a member counts as a broad collaborator.
const BROAD_COLLABORATOR_SCORE: u8 = 60;

// ============================================================================
// Insight
// ============================================================================

/// Severity class, which is also the display sort key: warnings first,
/// neutral last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Info,
    Success,
    Neutral,
}

impl InsightKind {
    fn rank(self) -> u8 {
        match self {
            InsightKind::Warning => 0,
            InsightKind::Info => 1,
            InsightKind::Success => 2,
            InsightKind::Neutral => 3,
        }
    }
}

/// One displayable insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Insight {
    pub fn new(kind: InsightKind, icon: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            icon: icon.to_owned(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Severity ordering for display: warning < info < success < neutral,
/// ties keep generation order (stable sort).
pub fn sort_for_display(insights: &mut [Insight]) {
    insights.sort_by_key(|i| i.kind.rank());
}

// ============================================================================
// Previous-week carrier
// ============================================================================

/// The same member's wait counts from the week before, when the caller has
/// them. Without this, week-over-week insights are structurally impossible
/// and simply absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousWeek {
    pub inbound: usize,
    pub outbound: usize,
}

impl From<&MemberSummary> for PreviousWeek {
    fn from(summary: &MemberSummary) -> Self {
        Self {
            inbound: summary.pre_inbound,
            outbound: summary.pre_count,
        }
    }
}

// ============================================================================
// Personal insights
// ============================================================================

/// Insights about one member's week.
pub fn generate_personal_insights(
    items: &[WorkItem],
    member_name: &str,
    previous: Option<&PreviousWeek>,
) -> Vec<Insight> {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);
    let summary = summary_from(&graph, &index, member_name);
    let intensity = bottlenecks_from(&graph, &index)
        .into_iter()
        .find(|n| n.name == member_name)
        .map_or(0, |n| n.intensity);

    let mut insights = Vec::new();

    if summary.total_collaborations == 0 {
        insights.push(Insight::new(
            InsightKind::Neutral,
            "💤",
            "No collaboration activity recorded this week.",
        ));
    } else {
        match IntensityBand::of(intensity) {
            IntensityBand::Critical | IntensityBand::Warning => {
                insights.push(
                    Insight::new(
                        InsightKind::Warning,
                        "🚧",
                        format!(
                            "{} waiting on your work — you are a bottleneck this week.",
                            people(summary.pre_inbound)
                        ),
                    )
                    .with_detail("Consider unblocking waiters before starting new work."),
                );
            }
            IntensityBand::Caution => {
                insights.push(Insight::new(
                    InsightKind::Info,
                    "🔎",
                    format!("{} waiting on your work.", people(summary.pre_inbound)),
                ));
            }
            IntensityBand::Normal => {}
        }

        if summary.pre_count >= OUTBOUND_HEAVY {
            insights.push(Insight::new(
                InsightKind::Info,
                "⏳",
                format!(
                    "You are waiting on {} — watch for stalled items.",
                    people(summary.pre_count)
                ),
            ));
        }

        if summary.cross_domain_score >= BROAD_COLLABORATOR_SCORE {
            insights.push(Insight::new(
                InsightKind::Success,
                "🌐",
                format!(
                    "{}% of your collaboration crosses domain boundaries — broad collaborator.",
                    summary.cross_domain_score
                ),
            ));
        }
    }

    if let Some(prev) = previous {
        let diff = summary.pre_inbound as i64 - prev.inbound as i64;
        if diff < 0 {
            insights.push(Insight::new(
                InsightKind::Success,
                "📉",
                format!("Bottleneck load eased: {} fewer waiting than last week.", -diff),
            ));
        } else if diff > 0 {
            insights.push(Insight::new(
                InsightKind::Warning,
                "📈",
                format!("Bottleneck load grew: {diff} more waiting than last week."),
            ));
        }
    }

    sort_for_display(&mut insights);
    insights
}

// ============================================================================
// Team insights
// ============================================================================

/// Insights about the whole week.
pub fn generate_team_insights(items: &[WorkItem]) -> Vec<Insight> {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);
    let nodes = bottlenecks_from(&graph, &index);

    let mut insights = Vec::new();

    let critical: Vec<&str> = nodes
        .iter()
        .filter(|n| n.band() == IntensityBand::Critical && n.inbound_count > 0)
        .map(|n| n.name.as_str())
        .collect();
    if !critical.is_empty() {
        insights.push(
            Insight::new(
                InsightKind::Warning,
                "🚨",
                format!("Critical bottleneck load on: {}.", critical.join(", ")),
            )
            .with_detail("These members have the week's highest inbound wait counts."),
        );
    }

    let busiest_lane = matrix_from(&graph, &index, RelationFilter::Both)
        .into_iter()
        .filter(|c| c.source_domain != c.target_domain && c.total_count > 0)
        .max_by(|a, b| a.total_count.cmp(&b.total_count));
    if let Some(lane) = busiest_lane {
        insights.push(Insight::new(
            InsightKind::Info,
            "🔗",
            format!(
                "Busiest cross-domain lane: {} → {} ({} collaborations).",
                lane.source_domain, lane.target_domain, lane.total_count
            ),
        ));
    }

    if graph.edges.is_empty() {
        insights.push(Insight::new(
            InsightKind::Neutral,
            "💤",
            "No collaboration declared this week.",
        ));
    } else if nodes.is_empty() {
        insights.push(Insight::new(
            InsightKind::Success,
            "✅",
            "No wait bottlenecks this week — all collaboration is concurrent.",
        ));
    }

    sort_for_display(&mut insights);
    insights
}

fn people(count: usize) -> String {
    if count == 1 {
        "1 person is".to_owned()
    } else {
        format!("{count} people are")
    }
}
