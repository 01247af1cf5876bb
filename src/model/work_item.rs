//! Work items and collaborator declarations.

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use super::Relation;
use crate::{Error, Result};

/// Reported risk for a work item. Carried through the engine untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// A declared relation from the owning item's member toward another member.
///
/// Two historical wire shapes exist: the legacy single-value `relation`
/// field and the current multi-value `relations` field. Both deserialize;
/// [`Collaborator::effective_relations`] applies the precedence rule.
/// Unknown relation strings in either field are skipped (with a warning),
/// not fatal — one bad tag must not sink the whole week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "relation_lenient"
    )]
    pub relation: Option<Relation>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "relations_lenient"
    )]
    pub relations: Vec<Relation>,
}

impl Collaborator {
    pub fn new(name: impl Into<String>, relation: Relation) -> Self {
        Self {
            name: name.into(),
            relation: Some(relation),
            relations: Vec::new(),
        }
    }

    pub fn with_relations(
        name: impl Into<String>,
        relations: impl IntoIterator<Item = Relation>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: None,
            relations: relations.into_iter().collect(),
        }
    }

    /// The effective relation set: `relations` if non-empty, else the
    /// singleton `relation`, else empty.
    pub fn effective_relations(&self) -> SmallVec<[Relation; 2]> {
        if !self.relations.is_empty() {
            self.relations.iter().copied().collect()
        } else {
            self.relation.into_iter().collect()
        }
    }
}

/// One member's reported unit of work for a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Member display name. This is the node identity in the collaboration
    /// graph: exact string match, no trimming, no case folding.
    pub name: String,
    /// Organizational category ("FE", "BE", ...). The matrix axis.
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub project: String,
    /// Used only for cross-module scoring, never for graph topology.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Actual progress percent. Carried through, not consumed.
    #[serde(default)]
    pub progress: f64,
    /// Planned progress percent. Carried through, not consumed.
    #[serde(default)]
    pub planned_progress: f64,
}

impl WorkItem {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            project: String::new(),
            module: None,
            collaborators: Vec::new(),
            risk_level: RiskLevel::Low,
            progress: 0.0,
            planned_progress: 0.0,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_collaborator(mut self, collaborator: Collaborator) -> Self {
        self.collaborators.push(collaborator);
        self
    }

    pub fn with_progress(mut self, planned: f64, actual: f64) -> Self {
        self.planned_progress = planned;
        self.progress = actual;
        self
    }

    /// Boundary check for the carried-through numeric fields. The analytics
    /// never consume them, but callers feeding them onward should reject
    /// non-finite or negative percentages here rather than propagate NaN.
    pub fn validate(&self) -> Result<()> {
        for (context, value) in [
            ("progress", self.progress),
            ("planned_progress", self.planned_progress),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::NonFiniteInput {
                    context: context.to_owned(),
                    value,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Lenient relation deserialization
// ============================================================================

fn relation_lenient<'de, D>(deserializer: D) -> std::result::Result<Option<Relation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse::<Relation>() {
        Ok(relation) => Some(relation),
        Err(_) => {
            warn!(kind = %s, "skipping unknown relation kind");
            None
        }
    }))
}

fn relations_lenient<'de, D>(deserializer: D) -> std::result::Result<Vec<Relation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|s| match s.parse::<Relation>() {
            Ok(relation) => Some(relation),
            Err(_) => {
                warn!(kind = %s, "skipping unknown relation kind");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_effective_relations_prefers_multi_value() {
        let collab = Collaborator {
            name: "Bea".into(),
            relation: Some(Relation::Pair),
            relations: vec![Relation::Pre, Relation::Post],
        };
        assert_eq!(
            collab.effective_relations().as_slice(),
            &[Relation::Pre, Relation::Post]
        );
    }

    #[test]
    fn test_effective_relations_falls_back_to_legacy_field() {
        let collab = Collaborator::new("Bea", Relation::Pair);
        assert_eq!(collab.effective_relations().as_slice(), &[Relation::Pair]);

        let empty = Collaborator {
            name: "Bea".into(),
            relation: None,
            relations: vec![],
        };
        assert!(empty.effective_relations().is_empty());
    }

    #[test]
    fn test_deserialize_legacy_shape() {
        let item: WorkItem = serde_json::from_str(
            r#"{
                "name": "Ada",
                "domain": "BE",
                "collaborators": [{"name": "Bea", "relation": "pre"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            item.collaborators[0].effective_relations().as_slice(),
            &[Relation::Pre]
        );
    }

    #[test]
    fn test_deserialize_skips_unknown_relation_kinds() {
        let item: WorkItem = serde_json::from_str(
            r#"{
                "name": "Ada",
                "domain": "BE",
                "collaborators": [
                    {"name": "Bea", "relations": ["pre", "mystery", "pair"]},
                    {"name": "Cyn", "relation": "mystery"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            item.collaborators[0].effective_relations().as_slice(),
            &[Relation::Pre, Relation::Pair]
        );
        assert!(item.collaborators[1].effective_relations().is_empty());
    }

    #[test]
    fn test_validate_rejects_non_finite_progress() {
        let mut item = WorkItem::new("Ada", "BE").with_progress(50.0, 40.0);
        assert!(item.validate().is_ok());

        item.progress = f64::NAN;
        assert!(matches!(
            item.validate(),
            Err(Error::NonFiniteInput { context, .. }) if context == "progress"
        ));

        item.progress = -10.0;
        assert!(item.validate().is_err());
    }
}
