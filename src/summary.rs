//! Per-member collaboration summary and radar scoring.

use serde::{Deserialize, Serialize};

use crate::graph::{CollabGraph, WeekIndex, build_graph};
use crate::model::{Relation, WorkItem};

/// One member's raw collaboration counts plus the two percentage scores.
///
/// Counts are deliberately un-normalized: radar normalization needs the
/// week's cross-member maxima, which a per-member call cannot see. Use
/// [`radar_axes`] for the normalized view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Pair edges touching this member, one count per edge instance.
    pub pair_count: usize,
    /// Outbound `pre`: people this member waits on. Always equals the
    /// bottleneck analyzer's `outbound_count` for the same member.
    pub pre_count: usize,
    /// Inbound `pre`: people waiting on this member. Always equals the
    /// bottleneck analyzer's `inbound_count`.
    pub pre_inbound: usize,
    /// Percentage (0–100) of this member's pair+pre edges whose other
    /// endpoint sits in a different domain. 0 when the member owns no item.
    pub cross_domain_score: u8,
    /// Same, keyed on module. Endpoints without a declared module are
    /// excluded from the computation.
    pub cross_module_score: u8,
    /// `pair_count + pre_count + pre_inbound`. Consumers treat the summary
    /// as "no data" when this is 0.
    pub total_collaborations: usize,
}

/// Summarize one member's week.
pub fn member_summary(items: &[WorkItem], member_name: &str) -> MemberSummary {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);
    summary_from(&graph, &index, member_name)
}

pub(crate) fn summary_from(
    graph: &CollabGraph,
    index: &WeekIndex,
    member_name: &str,
) -> MemberSummary {
    let own_domain = if index.owners().contains(member_name) {
        Some(index.domain_of(member_name))
    } else {
        None
    };
    let own_module = index.module_of(member_name);

    let mut pair_count = 0;
    let mut pre_count = 0;
    let mut pre_inbound = 0;
    let mut domain_edges = 0;
    let mut domain_cross = 0;
    let mut module_edges = 0;
    let mut module_cross = 0;

    for edge in &graph.edges {
        let outgoing = edge.from == member_name;
        let incoming = edge.to == member_name;
        if !outgoing && !incoming {
            continue;
        }
        let is_self = edge.from == edge.to;

        match edge.kind {
            Relation::Pair => pair_count += 1,
            Relation::Pre if !is_self => {
                if outgoing {
                    pre_count += 1;
                } else {
                    pre_inbound += 1;
                }
            }
            // Post edges are the mirrored declaration of pre and self-waits
            // carry no signal; neither feeds the summary.
            _ => continue,
        }

        if is_self {
            continue;
        }
        let (other_name, other_domain) = if outgoing {
            (edge.to.as_str(), edge.domain_to.as_str())
        } else {
            (edge.from.as_str(), edge.domain_from.as_str())
        };
        if let Some(own) = own_domain {
            domain_edges += 1;
            if other_domain != own {
                domain_cross += 1;
            }
        }
        if let Some(own) = own_module
            && let Some(other) = index.module_of(other_name)
        {
            module_edges += 1;
            if other != own {
                module_cross += 1;
            }
        }
    }

    MemberSummary {
        pair_count,
        pre_count,
        pre_inbound,
        cross_domain_score: percentage(domain_cross, domain_edges),
        cross_module_score: percentage(module_cross, module_edges),
        total_collaborations: pair_count + pre_count + pre_inbound,
    }
}

fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u8
}

// ============================================================================
// Radar normalization
// ============================================================================

/// One member's radar axes, each scaled 0–100 against the week's per-axis
/// maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRadar {
    pub name: String,
    pub pair: u8,
    pub outbound_wait: u8,
    pub inbound_wait: u8,
    pub cross_domain: u8,
    pub cross_module: u8,
}

/// Cross-member radar view over every item owner, in sorted name order.
///
/// This is the normalization step the per-member scorer cannot do itself:
/// raw counts divided by that week's maximum for the axis; the percentage
/// scores pass through unchanged. An axis whose maximum is 0 scores 0 for
/// everyone.
pub fn radar_axes(items: &[WorkItem]) -> Vec<MemberRadar> {
    let graph = build_graph(items);
    let index = WeekIndex::build(items);

    let summaries: Vec<(&String, MemberSummary)> = index
        .owners()
        .iter()
        .map(|name| (name, summary_from(&graph, &index, name)))
        .collect();

    let max_pair = summaries.iter().map(|(_, s)| s.pair_count).max().unwrap_or(0);
    let max_out = summaries.iter().map(|(_, s)| s.pre_count).max().unwrap_or(0);
    let max_in = summaries.iter().map(|(_, s)| s.pre_inbound).max().unwrap_or(0);

    summaries
        .into_iter()
        .map(|(name, s)| MemberRadar {
            name: name.clone(),
            pair: scale(s.pair_count, max_pair),
            outbound_wait: scale(s.pre_count, max_out),
            inbound_wait: scale(s.pre_inbound, max_in),
            cross_domain: s.cross_domain_score,
            cross_module: s.cross_module_score,
        })
        .collect()
}

fn scale(value: usize, max: usize) -> u8 {
    if max == 0 {
        return 0;
    }
    (100.0 * value as f64 / max as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bottleneck::bottleneck_nodes;
    use crate::model::Collaborator;
    use pretty_assertions::assert_eq;

    fn week() -> Vec<WorkItem> {
        vec![
            WorkItem::new("Ada", "BE")
                .with_module("api")
                .with_collaborator(Collaborator::new("Bea", Relation::Pair))
                .with_collaborator(Collaborator::new("Cyn", Relation::Pre)),
            WorkItem::new("Bea", "FE")
                .with_module("ui")
                .with_collaborator(Collaborator::new("Ada", Relation::Pre)),
            WorkItem::new("Cyn", "BE").with_module("api"),
        ]
    }

    #[test]
    fn test_counts_and_scores() {
        let s = member_summary(&week(), "Ada");
        assert_eq!(s.pair_count, 1); // pair with Bea
        assert_eq!(s.pre_count, 1); // waits on Cyn
        assert_eq!(s.pre_inbound, 1); // Bea waits on Ada
        assert_eq!(s.total_collaborations, 3);
        // Edges touching Ada: pair→Bea (FE, cross), pre→Cyn (BE, same),
        // pre←Bea (FE, cross) ⇒ 2/3.
        assert_eq!(s.cross_domain_score, 67);
        // Modules: Bea=ui (cross), Cyn=api (same), Bea=ui (cross) ⇒ 2/3.
        assert_eq!(s.cross_module_score, 67);
    }

    #[test]
    fn test_matches_bottleneck_counts() {
        let items = week();
        let nodes = bottleneck_nodes(&items);
        for name in ["Ada", "Bea", "Cyn"] {
            let s = member_summary(&items, name);
            let node = nodes.iter().find(|n| n.name == name);
            assert_eq!(s.pre_count, node.map_or(0, |n| n.outbound_count), "{name}");
            assert_eq!(s.pre_inbound, node.map_or(0, |n| n.inbound_count), "{name}");
        }
    }

    #[test]
    fn test_member_without_items_scores_zero_percentages() {
        let items = vec![
            WorkItem::new("Ada", "BE").with_collaborator(Collaborator::new("Ghost", Relation::Pre)),
        ];
        let s = member_summary(&items, "Ghost");
        // Inbound wait still counted; percentage scores have no basis.
        assert_eq!(s.pre_inbound, 1);
        assert_eq!(s.cross_domain_score, 0);
        assert_eq!(s.cross_module_score, 0);
    }

    #[test]
    fn test_absent_member_is_all_zero() {
        let s = member_summary(&week(), "Nobody");
        assert_eq!(s, MemberSummary::default());
    }

    #[test]
    fn test_missing_modules_excluded_from_cross_module() {
        let items = vec![
            WorkItem::new("Ada", "BE")
                .with_module("api")
                .with_collaborator(Collaborator::new("Bea", Relation::Pair))
                .with_collaborator(Collaborator::new("Cyn", Relation::Pair)),
            WorkItem::new("Bea", "FE").with_module("ui"),
            WorkItem::new("Cyn", "BE"), // no module
        ];
        let s = member_summary(&items, "Ada");
        // Only the Bea edge has a resolvable module on both ends.
        assert_eq!(s.cross_module_score, 100);
    }

    #[test]
    fn test_radar_normalizes_against_week_maxima() {
        let items = vec![
            WorkItem::new("Ada", "BE")
                .with_collaborator(Collaborator::new("Bea", Relation::Pair))
                .with_collaborator(Collaborator::new("Bea", Relation::Pair)),
            WorkItem::new("Bea", "FE").with_collaborator(Collaborator::new("Ada", Relation::Pair)),
        ];
        let radar = radar_axes(&items);
        assert_eq!(radar.len(), 2);
        // Ada touches 3 pair edges (2 declared + 1 inbound), Bea the same 3.
        assert_eq!(radar[0].name, "Ada");
        assert_eq!(radar[0].pair, 100);
        assert_eq!(radar[1].pair, 100);
        // No pre edges anywhere: axis max is 0, everyone scores 0.
        assert_eq!(radar[0].inbound_wait, 0);
        assert_eq!(radar[0].outbound_wait, 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(member_summary(&[], "Ada"), MemberSummary::default());
        assert!(radar_axes(&[]).is_empty());
    }
}
