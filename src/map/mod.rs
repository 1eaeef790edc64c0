//! Map graph as seen by the view
//!
//! The node graph belongs to the game: nodes, states and adjacency are owned
//! and mutated elsewhere. The view only reads it through `MapGraph`. Layout
//! results are kept by the renderer in `LayoutAnnotations`, keyed by node id,
//! and never written back onto the nodes.

pub mod layout;

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use layout::{LayoutAnnotations, LayoutEngine, NodeLayout};

/// Node kinds; drives mesh, color and spin speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Camp / extraction point
    Root,
    Combat,
    EventChoice,
    EventInteraction,
    EventQuest,
    Resource,
    Shop,
    Rest,
    /// Entrance to the next, deeper floor
    PortalNextFloor,
    /// Chapter exit; branch entrances share its model
    PortalNextChapter,
    /// Landmark with no gameplay of its own
    Location,
}

impl NodeType {
    pub const ALL: [NodeType; 11] = [
        NodeType::Root,
        NodeType::Combat,
        NodeType::EventChoice,
        NodeType::EventInteraction,
        NodeType::EventQuest,
        NodeType::Resource,
        NodeType::Shop,
        NodeType::Rest,
        NodeType::PortalNextFloor,
        NodeType::PortalNextChapter,
        NodeType::Location,
    ];

    /// Mesh resource key (file stem) for this type
    pub fn mesh_key(self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Combat => "combat",
            NodeType::EventChoice => "event_choice",
            NodeType::EventInteraction => "event_interaction",
            NodeType::EventQuest => "event_quest",
            NodeType::Resource => "resource",
            NodeType::Shop => "shop",
            NodeType::Rest => "rest",
            NodeType::PortalNextFloor => "next_floor",
            NodeType::PortalNextChapter => "portal",
            NodeType::Location => "location",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeType::Root => "ROOT",
            NodeType::Combat => "COMBAT",
            NodeType::EventChoice => "EVENT_CHOICE",
            NodeType::EventInteraction => "EVENT_INTERACTION",
            NodeType::EventQuest => "EVENT_QUEST",
            NodeType::Resource => "RESOURCE",
            NodeType::Shop => "SHOP",
            NodeType::Rest => "REST",
            NodeType::PortalNextFloor => "PORTAL_NEXT_FLOOR",
            NodeType::PortalNextChapter => "PORTAL_NEXT_CHAPTER",
            NodeType::Location => "LOCATION",
        }
    }
}

/// Fog-of-war state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    /// Hidden in fog: never drawn, never connected
    #[default]
    Locked,
    Revealed,
    Visited,
    /// Where the player stands
    Current,
}

/// Placement role, tagged by whoever creates the node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeRole {
    /// Sits on its layer's ring
    #[default]
    Main,
    /// Shoots outward from the node that leads to it
    Branch,
}

/// Id fragment older map generators used for branch entrances
pub const LEGACY_BRANCH_MARKER: &str = "_sub_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub state: NodeState,
    #[serde(default)]
    pub layer_index: u32,
    #[serde(default)]
    pub next_nodes: Vec<String>,
    #[serde(default)]
    pub role: NodeRole,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MapNode {
    pub fn new(id: impl Into<String>, node_type: NodeType, layer_index: u32) -> Self {
        Self {
            id: id.into(),
            node_type,
            state: NodeState::Locked,
            layer_index,
            next_nodes: Vec::new(),
            role: NodeRole::Main,
            name: None,
            description: None,
        }
    }

    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    pub fn with_next(mut self, next: &[&str]) -> Self {
        self.next_nodes = next.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_locked(&self) -> bool {
        self.state == NodeState::Locked
    }

    pub fn is_branch(&self) -> bool {
        self.role == NodeRole::Branch
    }

    pub fn leads_to(&self, id: &str) -> bool {
        self.next_nodes.iter().any(|n| n == id)
    }

    /// Role implied by the old id convention: a chapter portal whose id
    /// carries the branch marker.
    pub fn legacy_role(&self) -> NodeRole {
        if self.id.contains(LEGACY_BRANCH_MARKER) && self.node_type == NodeType::PortalNextChapter {
            NodeRole::Branch
        } else {
            NodeRole::Main
        }
    }
}

/// Read access to the live map
pub trait MapGraph {
    /// Nodes of the map currently on screen
    fn current_nodes(&self) -> &[MapNode];

    /// Node the player stands on
    fn current_node_id(&self) -> Option<&str>;

    fn find(&self, id: &str) -> Option<&MapNode> {
        self.current_nodes().iter().find(|n| n.id == id)
    }

    /// Layer of the current node
    fn current_layer(&self) -> Option<u32> {
        let id = self.current_node_id()?;
        self.find(id).map(|n| n.layer_index)
    }
}

/// Error type for map file loading
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A self-contained map, as loaded from a RON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_node_id: Option<String>,
    pub nodes: Vec<MapNode>,
}

impl MapData {
    pub fn new(name: impl Into<String>, nodes: Vec<MapNode>) -> Self {
        Self {
            name: name.into(),
            current_node_id: None,
            nodes,
        }
    }

    /// Load a map from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a map from RON, validate it and tag legacy branch nodes
    pub fn from_ron(s: &str) -> Result<Self, MapError> {
        let mut map: MapData = ron::from_str(s)?;
        map.validate()?;
        map.tag_legacy_branches();
        Ok(map)
    }

    /// Ids must be unique and the current node must exist
    pub fn validate(&self) -> Result<(), MapError> {
        let mut seen = std::collections::HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(MapError::Validation(format!("duplicate node id '{}'", node.id)));
            }
        }
        if let Some(current) = &self.current_node_id {
            if !seen.contains(current.as_str()) {
                return Err(MapError::Validation(format!("current node '{}' not in map", current)));
            }
        }
        Ok(())
    }

    /// Maps written before roles existed mark branches through their ids.
    /// Explicit BRANCH tags are never downgraded.
    pub fn tag_legacy_branches(&mut self) {
        for node in &mut self.nodes {
            if node.role == NodeRole::Main {
                node.role = node.legacy_role();
            }
        }
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }
}

impl MapGraph for MapData {
    fn current_nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    fn current_node_id(&self) -> Option<&str> {
        self.current_node_id.as_deref()
    }
}
