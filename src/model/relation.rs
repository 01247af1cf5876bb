//! Collaboration relation kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How a work item's owner relates to a named collaborator.
///
/// `Pre` and `Post` are one-sided declarations contributed by the declaring
/// item only. A `pre` on A's item (A waits on B) and a `post` on B's item
/// (B acts after A) may both exist independently; the graph never assumes
/// they mirror each other and never deduplicates one against the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Mutual concurrent work. Undirected.
    Pair,
    /// The declaring member waits on the collaborator. An edge A→B of this
    /// kind reads "A is blocked by B": outbound `pre` from a node counts the
    /// people that node waits on, inbound `pre` counts the people waiting
    /// on it.
    Pre,
    /// The collaborator's work follows the declaring member's.
    Post,
}

impl Relation {
    /// The wire string for this kind (`"pair"`, `"pre"`, `"post"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Pair => "pair",
            Relation::Pre => "pre",
            Relation::Post => "post",
        }
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pair" => Ok(Relation::Pair),
            "pre" => Ok(Relation::Pre),
            "post" => Ok(Relation::Post),
            other => Err(Error::UnknownRelationKind { kind: other.to_owned() }),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
