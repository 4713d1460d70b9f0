pub type NodeIndex = u32;

/// Handle into the document arena. Handles stay unique for the lifetime of
/// the document; a removed node's handle resolves to nothing rather than
/// being reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub NodeIndex);

/// Payload distinguishing the node kinds the engine cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

/// A single node: payload plus intrusive tree links, so sibling and ancestor
/// walks need no side tables and splices are O(1).
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }
}
