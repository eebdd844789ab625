//! Edge attributes and the core edge struct.

use serde::{Deserialize, Serialize};

/// Classification tag carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAttribute {
    /// Transition between two nodes of the same group.
    IntraGroup,
    /// Transition from one group to another.
    CrossGroup,
    /// Known transition that is switched off; never routable.
    Disabled,
    /// Transition from a node to itself.
    SelfReference,
    /// Transition referenced by the source but not implemented.
    NotImplemented,
    /// Structural "go back" transition; never a forward route.
    Backtracking,
    /// First leg of a split restrictive-transitivity edge.
    RestrictiveTransitivityTail,
    /// Second leg of a split restrictive-transitivity edge.
    RestrictiveTransitivityHead,
}

impl EdgeAttribute {
    /// Return a human-readable name for this attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IntraGroup => "intra_group",
            Self::CrossGroup => "cross_group",
            Self::Disabled => "disabled",
            Self::SelfReference => "self_reference",
            Self::NotImplemented => "not_implemented",
            Self::Backtracking => "backtracking",
            Self::RestrictiveTransitivityTail => "restrictive_transitivity_tail",
            Self::RestrictiveTransitivityHead => "restrictive_transitivity_head",
        }
    }

    /// Parse an edge attribute from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "intra_group" | "intragroup" => Some(Self::IntraGroup),
            "cross_group" | "crossgroup" => Some(Self::CrossGroup),
            "disabled" => Some(Self::Disabled),
            "self_reference" | "selfreference" => Some(Self::SelfReference),
            "not_implemented" | "notimplemented" => Some(Self::NotImplemented),
            "backtracking" => Some(Self::Backtracking),
            "restrictive_transitivity_tail" | "tail" => Some(Self::RestrictiveTransitivityTail),
            "restrictive_transitivity_head" | "head" => Some(Self::RestrictiveTransitivityHead),
            _ => None,
        }
    }
}

impl std::fmt::Display for EdgeAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Source node ID.
    pub source_id: u64,
    /// Target node ID.
    pub target_id: u64,
    /// Classification attributes.
    pub attributes: Vec<EdgeAttribute>,
    /// Shared by the two legs of a split edge (0 when unused).
    pub transitivity_id: i64,
}

impl Edge {
    /// Create a new edge with no transitivity group.
    pub fn new(source_id: u64, target_id: u64, attributes: Vec<EdgeAttribute>) -> Self {
        Self {
            source_id,
            target_id,
            attributes,
            transitivity_id: 0,
        }
    }

    /// Create a new edge belonging to a transitivity group.
    pub fn with_transitivity(
        source_id: u64,
        target_id: u64,
        attributes: Vec<EdgeAttribute>,
        transitivity_id: i64,
    ) -> Self {
        Self {
            source_id,
            target_id,
            attributes,
            transitivity_id,
        }
    }

    /// Whether this edge carries the given attribute.
    pub fn has_attribute(&self, attribute: EdgeAttribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// True when neither backtracking nor disabled, i.e. a legitimate forward hop.
    pub fn is_navigable(&self) -> bool {
        !self.has_attribute(EdgeAttribute::Backtracking) && !self.has_attribute(EdgeAttribute::Disabled)
    }

    /// Same transitivity group and same attribute set (order and repeats ignored).
    pub fn is_duplicate_of(&self, other: &Edge) -> bool {
        if self.transitivity_id != other.transitivity_id {
            return false;
        }
        self.attributes.iter().all(|a| other.attributes.contains(a))
            && other.attributes.iter().all(|a| self.attributes.contains(a))
    }
}

/// An edge as delivered by ingestion: endpoints referenced by node name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    /// Name of the source node.
    pub source: String,
    /// Name of the target node.
    pub target: String,
    /// Classification attributes.
    #[serde(default)]
    pub attributes: Vec<EdgeAttribute>,
    /// Transitivity group identifier.
    #[serde(default)]
    pub transitivity_id: i64,
}

impl EdgeInput {
    /// Create a new input edge between two named nodes.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        attributes: Vec<EdgeAttribute>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes,
            transitivity_id: 0,
        }
    }

    /// Set the transitivity group identifier.
    pub fn transitivity(mut self, transitivity_id: i64) -> Self {
        self.transitivity_id = transitivity_id;
        self
    }
}
