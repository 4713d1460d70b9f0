use crate::selection::Selection;
use crate::types::{Node, NodeData, NodeId};

/// The live document tree.
///
/// Nodes live in a slab indexed by [`NodeId`]; removed slots become
/// tombstones so a handle held across a page mutation resolves to `None`
/// instead of aliasing an unrelated node. The engine treats this tree as
/// externally owned: reads tolerate stale ids, and the only mutations it
/// performs are the ones in [`crate::mutate`].
pub struct Dom {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    pub(crate) selection: Option<Selection>,
    pub(crate) selection_revision: u64,
    pub(crate) selection_color: Option<(u8, u8, u8, u8)>,
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Dom {
            nodes: Vec::new(),
            root: NodeId(0),
            selection: None,
            selection_revision: 0,
            selection_color: None,
        };
        dom.root = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    // -- construction ------------------------------------------------------

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.create_element_with(name, Vec::new(), Vec::new())
    }

    pub fn create_element_with(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
        style: Vec<(String, String)>,
    ) -> NodeId {
        self.alloc(Node::new(NodeData::Element {
            name: name.to_ascii_lowercase(),
            attributes,
            style,
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Text {
            text: text.to_string(),
        }))
    }

    // -- structure ---------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.last_child
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.prev_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.next_sibling
    }

    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter {
            dom: self,
            next: self.first_child(id),
        }
    }

    /// Append `child` (must be detached) to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        let prev = self.last_child(parent);
        {
            let c = self.node_mut(child).unwrap();
            c.parent = Some(parent);
            c.prev_sibling = prev;
            c.next_sibling = None;
        }
        if let Some(prev) = prev {
            self.node_mut(prev).unwrap().next_sibling = Some(child);
        } else {
            self.node_mut(parent).unwrap().first_child = Some(child);
        }
        self.node_mut(parent).unwrap().last_child = Some(child);
    }

    /// Insert `child` (must be detached) immediately before `before`, which
    /// must be a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.parent(before) != Some(parent) {
            return;
        }
        let prev = self.prev_sibling(before);
        {
            let c = self.node_mut(child).unwrap();
            c.parent = Some(parent);
            c.prev_sibling = prev;
            c.next_sibling = Some(before);
        }
        self.node_mut(before).unwrap().prev_sibling = Some(child);
        if let Some(prev) = prev {
            self.node_mut(prev).unwrap().next_sibling = Some(child);
        } else {
            self.node_mut(parent).unwrap().first_child = Some(child);
        }
    }

    /// Unlink `id` from its parent and siblings. The node stays alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if let Some(prev) = prev {
            self.node_mut(prev).unwrap().next_sibling = next;
        } else if let Some(parent) = parent {
            self.node_mut(parent).unwrap().first_child = next;
        }
        if let Some(next) = next {
            self.node_mut(next).unwrap().prev_sibling = prev;
        } else if let Some(parent) = parent {
            self.node_mut(parent).unwrap().last_child = prev;
        }
        let n = self.node_mut(id).unwrap();
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
    }

    /// Detach `id` and tombstone it along with its entire subtree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let mut child = self.first_child(cur);
            while let Some(c) = child {
                child = self.next_sibling(c);
                stack.push(c);
            }
            if let Some(slot) = self.nodes.get_mut(cur.0 as usize) {
                *slot = None;
            }
        }
    }

    // -- content accessors --------------------------------------------------

    pub fn is_text(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_text)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_element)
    }

    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    pub fn style_declarations(&self, id: NodeId) -> Option<&[(String, String)]> {
        match &self.node(id)?.data {
            NodeData::Element { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Length of a text node in Unicode scalar values. All character offsets
    /// in the engine use this unit.
    pub fn text_char_len(&self, id: NodeId) -> Option<usize> {
        Some(self.text(id)?.chars().count())
    }

    pub fn char_at(&self, id: NodeId, char_idx: usize) -> Option<char> {
        self.text(id)?.chars().nth(char_idx)
    }

    /// Concatenated text of a subtree in document order. Test and debugging
    /// aid; makes no visibility judgment.
    pub fn subtree_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(text) = self.text(cur) {
                out.push_str(text);
            }
            let mut rev = Vec::new();
            let mut child = self.first_child(cur);
            while let Some(c) = child {
                rev.push(c);
                child = self.next_sibling(c);
            }
            while let Some(c) = rev.pop() {
                stack.push(c);
            }
        }
        out
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChildIter<'a> {
    dom: &'a Dom,
    next: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.dom.next_sibling(cur);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_iterate_children() {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        dom.append_child(dom.root(), p);
        let a = dom.create_text("a");
        let b = dom.create_text("b");
        dom.append_child(p, a);
        dom.append_child(p, b);

        let kids: Vec<_> = dom.children(p).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(dom.prev_sibling(b), Some(a));
        assert_eq!(dom.parent(a), Some(p));
    }

    #[test]
    fn insert_before_links_siblings() {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        dom.append_child(dom.root(), p);
        let a = dom.create_text("a");
        let c = dom.create_text("c");
        dom.append_child(p, a);
        dom.append_child(p, c);
        let b = dom.create_text("b");
        dom.insert_before(p, b, c);

        let kids: Vec<_> = dom.children(p).collect();
        assert_eq!(kids, vec![a, b, c]);
        assert_eq!(dom.subtree_text(p), "abc");
    }

    #[test]
    fn removed_ids_resolve_to_nothing() {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        dom.append_child(dom.root(), p);
        let t = dom.create_text("x");
        dom.append_child(p, t);

        dom.remove(p);
        assert!(!dom.contains(p));
        assert!(!dom.contains(t));
        assert_eq!(dom.text(t), None);
        assert_eq!(dom.next_sibling(t), None);
    }

    #[test]
    fn char_len_counts_scalar_values() {
        let mut dom = Dom::new();
        let t = dom.create_text("読み切り");
        dom.append_child(dom.root(), t);
        assert_eq!(dom.text_char_len(t), Some(4));
        assert_eq!(dom.char_at(t, 1), Some('み'));
    }
}
