//! Document-owned native selection state.
//!
//! The selection belongs to the document, not to the engine: the page (or
//! the user) may overwrite it at any time. A revision counter lets the
//! selection-based highlighter distinguish the selection it wrote from a
//! later external change.

use crate::tree::Dom;
use crate::types::NodeId;

/// Anchor/focus endpoints, each a text node plus a character offset.
/// The focus offset is exclusive, so a whole-leaf selection of a 3-char
/// leaf is `(leaf, 0) .. (leaf, 3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: (NodeId, usize),
    pub focus: (NodeId, usize),
}

impl Dom {
    /// Replace the document selection. Returns the new revision.
    pub fn set_selection(&mut self, selection: Selection) -> u64 {
        self.selection = Some(selection);
        self.selection_revision += 1;
        self.selection_revision
    }

    /// Clear the document selection. Returns the new revision.
    pub fn clear_selection(&mut self) -> u64 {
        self.selection = None;
        self.selection_revision += 1;
        self.selection_revision
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    /// Rendered-color override for the selection (the injected style rule of
    /// the selection highlight strategy). `None` means host default.
    pub fn set_selection_color(&mut self, color: Option<(u8, u8, u8, u8)>) {
        self.selection_color = color;
    }

    pub fn selection_color(&self) -> Option<(u8, u8, u8, u8)> {
        self.selection_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_advances_on_every_write() {
        let mut dom = Dom::new();
        let t = dom.create_text("読書");
        dom.append_child(dom.root(), t);

        let r1 = dom.set_selection(Selection {
            anchor: (t, 0),
            focus: (t, 2),
        });
        let r2 = dom.clear_selection();
        assert!(r2 > r1);
        assert_eq!(dom.selection(), None);
    }
}
