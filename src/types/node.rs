//! Node attributes and the core node struct.

use serde::{Deserialize, Serialize};

/// Classification tag carried by a node.
///
/// `Isolated`, `Source` and `Sink` are derived by the node analyzer and
/// written back after analysis; the others come from ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAttribute {
    /// A card (a single navigable location).
    Card,
    /// A stack (a group of cards).
    Stack,
    /// A synthesized node with no source document behind it.
    Virtual,
    /// The location holds a blue page.
    ContainsBluePage,
    /// The location holds a red page.
    ContainsRedPage,
    /// The location holds a white page.
    ContainsWhitePage,
    /// No incoming nor outgoing edges.
    Isolated,
    /// No incoming edges.
    Source,
    /// No outgoing edges.
    Sink,
}

impl NodeAttribute {
    /// Return a human-readable name for this attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Stack => "stack",
            Self::Virtual => "virtual",
            Self::ContainsBluePage => "contains_blue_page",
            Self::ContainsRedPage => "contains_red_page",
            Self::ContainsWhitePage => "contains_white_page",
            Self::Isolated => "isolated",
            Self::Source => "source",
            Self::Sink => "sink",
        }
    }

    /// Parse a node attribute from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "card" => Some(Self::Card),
            "stack" => Some(Self::Stack),
            "virtual" => Some(Self::Virtual),
            "contains_blue_page" | "blue_page" => Some(Self::ContainsBluePage),
            "contains_red_page" | "red_page" => Some(Self::ContainsRedPage),
            "contains_white_page" | "white_page" => Some(Self::ContainsWhitePage),
            "isolated" => Some(Self::Isolated),
            "source" => Some(Self::Source),
            "sink" => Some(Self::Sink),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A location in the navigation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Graph identifier (assigned sequentially on insertion).
    #[serde(default)]
    pub id: u64,
    /// Unique semantic name.
    pub name: String,
    /// Name of the group (stack) this node belongs to.
    #[serde(default)]
    pub group: String,
    /// Name as it appeared in the source document, when it was rewritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Secondary display name (e.g. the background the card uses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_name: Option<String>,
    /// Classification attributes, deduplicated.
    #[serde(default)]
    pub attributes: Vec<NodeAttribute>,
}

impl Node {
    /// Whether this node carries the given attribute.
    pub fn has_attribute(&self, attribute: NodeAttribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Append an attribute unless already present. Returns whether it was added.
    pub fn add_attribute(&mut self, attribute: NodeAttribute) -> bool {
        if self.has_attribute(attribute) {
            return false;
        }
        self.attributes.push(attribute);
        true
    }
}

/// Builder for constructing Node instances ergonomically.
pub struct NodeBuilder {
    name: String,
    group: String,
    original_name: Option<String>,
    secondary_name: Option<String>,
    attributes: Vec<NodeAttribute>,
}

impl NodeBuilder {
    /// Create a new builder with the required fields.
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            original_name: None,
            secondary_name: None,
            attributes: Vec::new(),
        }
    }

    /// Set the original name.
    pub fn original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    /// Set the secondary display name.
    pub fn secondary_name(mut self, name: impl Into<String>) -> Self {
        self.secondary_name = Some(name.into());
        self
    }

    /// Add an attribute (duplicates are ignored).
    pub fn attribute(mut self, attribute: NodeAttribute) -> Self {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }

    /// Build the Node. The id will be 0 (assigned by graph on insertion).
    pub fn build(self) -> Node {
        Node {
            id: 0,
            name: self.name,
            group: self.group,
            original_name: self.original_name,
            secondary_name: self.secondary_name,
            attributes: self.attributes,
        }
    }
}
