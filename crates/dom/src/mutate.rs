//! The two restricted mutations the engine is allowed to perform on a page
//! it does not own: splitting a text leaf at a character boundary, and
//! wrapping/unwrapping leaves in a marker element. `normalize` undoes the
//! leaf fragmentation those leave behind.
//!
//! Invariants:
//! - A split changes no other node's content and moves no unrelated nodes.
//! - Unwrap replaces the marker with its children, in order, in place.
//! - Normalize only merges directly adjacent text leaves; visible text is
//!   unchanged.

use crate::tree::Dom;
use crate::types::{NodeData, NodeId};

impl Dom {
    /// Split the text node `id` at `char_at` (a character offset, exclusive
    /// end of the head part). The node keeps `[0, char_at)`; a new node with
    /// `[char_at, len)` is inserted immediately after it.
    ///
    /// Returns the tail node, or `None` if `id` is not a live text node or
    /// `char_at` is not strictly inside it (degenerate splits are refused;
    /// the boundary already exists).
    pub fn split_text(&mut self, id: NodeId, char_at: usize) -> Option<NodeId> {
        let text = self.text(id)?;
        if char_at == 0 {
            return None;
        }
        let byte = byte_of_char(text, char_at)?;
        if byte == text.len() {
            return None;
        }
        let tail_text = text[byte..].to_string();

        let tail = self.create_text(&tail_text);
        match &mut self.node_mut(id)?.data {
            NodeData::Text { text } => text.truncate(byte),
            _ => unreachable!("checked text node above"),
        }

        let parent = self.parent(id)?;
        match self.next_sibling(id) {
            Some(next) => self.insert_before(parent, tail, next),
            None => self.append_child(parent, tail),
        }
        Some(tail)
    }

    /// Insert `marker` (a detached element) in `id`'s place and reparent
    /// `id` inside it. Returns false when either node is gone or `id` has
    /// no parent to splice into.
    pub fn wrap(&mut self, id: NodeId, marker: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if !self.is_element(marker) {
            return false;
        }
        self.insert_before(parent, marker, id);
        self.detach(id);
        self.append_child(marker, id);
        true
    }

    /// Replace `marker` with its children and discard it. The caller is
    /// expected to `normalize` the parent afterwards.
    pub fn unwrap(&mut self, marker: NodeId) -> bool {
        let Some(parent) = self.parent(marker) else {
            return false;
        };
        while let Some(child) = self.first_child(marker) {
            self.detach(child);
            self.insert_before(parent, child, marker);
        }
        self.remove(marker);
        true
    }

    /// Merge directly adjacent text children of `parent`. Merged-away nodes
    /// are tombstoned; their text is appended to the surviving left leaf.
    pub fn normalize(&mut self, parent: NodeId) {
        let mut cur = self.first_child(parent);
        while let Some(node) = cur {
            let next = self.next_sibling(node);
            match next {
                Some(next_node) if self.is_text(node) && self.is_text(next_node) => {
                    let appended = self.text(next_node).unwrap_or_default().to_string();
                    if let Some(NodeData::Text { text }) =
                        self.node_mut(node).map(|n| &mut n.data)
                    {
                        text.push_str(&appended);
                    }
                    self.remove(next_node);
                    // stay on `node`: it may now touch another text leaf
                }
                _ => cur = next,
            }
        }
    }
}

/// Byte offset of the `char_at`-th character of `text`; `Some(text.len())`
/// when `char_at` equals the character count.
pub fn byte_of_char(text: &str, char_at: usize) -> Option<usize> {
    if char_at == 0 {
        return Some(0);
    }
    let mut seen = 0usize;
    for (byte, _) in text.char_indices() {
        if seen == char_at {
            return Some(byte);
        }
        seen += 1;
    }
    if seen == char_at { Some(text.len()) } else { None }
}
