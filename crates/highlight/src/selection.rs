//! Selection-based highlighting: set the document's native selection over
//! the span and override its rendered color.
//!
//! The document's selection belongs to the user. We remember the revision we
//! wrote; if `sync` sees a different revision, the user (or the page) has
//! taken the selection over, and the color override must come off before it
//! leaks onto their selection.

use crate::{Highlight, HighlightKind};
use dom::{Dom, NodeId, Selection};
use geometry::{Rect, TextGeometry, merge_line_rects};

/// Selection color for a token with dictionary entries.
pub const SELECTION_COLOR: (u8, u8, u8, u8) = (144, 200, 255, 255);
/// Selection color for an unknown token (no entries).
pub const SELECTION_COLOR_UNKNOWN: (u8, u8, u8, u8) = (255, 144, 144, 255);

pub struct SelectionHighlight {
    nodes: Vec<NodeId>,
    written_revision: Option<u64>,
    hook: Option<Box<dyn FnMut()>>,
}

impl SelectionHighlight {
    pub fn new() -> Self {
        SelectionHighlight {
            nodes: Vec::new(),
            written_revision: None,
            hook: None,
        }
    }

    fn apply(&mut self, dom: &mut Dom, nodes: &[NodeId], color: (u8, u8, u8, u8)) {
        if self.is_active() {
            self.clear(dom);
            self.fire_hook();
        }
        let live: Vec<NodeId> = nodes.iter().copied().filter(|&n| dom.is_text(n)).collect();
        let (Some(&first), Some(&last)) = (live.first(), live.last()) else {
            return;
        };
        let end = dom.text_char_len(last).unwrap_or(0);
        let revision = dom.set_selection(Selection {
            anchor: (first, 0),
            focus: (last, end),
        });
        dom.set_selection_color(Some(color));
        self.nodes = live;
        self.written_revision = Some(revision);
        log::debug!(target: "highlight", "selection highlight over {} leaves", self.nodes.len());
    }

    fn clear(&mut self, dom: &mut Dom) {
        dom.clear_selection();
        dom.set_selection_color(None);
        self.nodes.clear();
        self.written_revision = None;
    }

    fn fire_hook(&mut self) {
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
    }
}

impl Default for SelectionHighlight {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlight for SelectionHighlight {
    fn highlight(&mut self, dom: &mut Dom, nodes: &[NodeId]) {
        self.apply(dom, nodes, SELECTION_COLOR);
    }

    fn highlight_red(&mut self, dom: &mut Dom, nodes: &[NodeId]) {
        self.apply(dom, nodes, SELECTION_COLOR_UNKNOWN);
    }

    fn unhighlight(&mut self, dom: &mut Dom) {
        if !self.is_active() {
            return;
        }
        self.clear(dom);
        self.fire_hook();
    }

    fn is_active(&self) -> bool {
        self.written_revision.is_some()
    }

    fn is_highlighted(&self, dom: &Dom, node: NodeId, char_idx: Option<usize>) -> bool {
        if !self.nodes.contains(&node) {
            return false;
        }
        match char_idx {
            Some(idx) => dom.text_char_len(node).is_some_and(|len| idx < len),
            None => true,
        }
    }

    fn rects(&self, dom: &Dom, geometry: &dyn TextGeometry) -> Vec<Rect> {
        let rects = self
            .nodes
            .iter()
            .flat_map(|&n| geometry.node_rects(dom, n))
            .collect();
        merge_line_rects(rects)
    }

    fn sync(&mut self, dom: &mut Dom) {
        let Some(written) = self.written_revision else {
            return;
        };
        if dom.selection_revision() == written {
            return;
        }
        // user-initiated deselection or reselection: hands off, but take the
        // color override with us
        log::debug!(target: "highlight", "external selection change; going idle");
        dom.set_selection_color(None);
        self.nodes.clear();
        self.written_revision = None;
        self.fire_hook();
    }

    fn kind(&self) -> HighlightKind {
        HighlightKind::Selection
    }

    fn set_unhighlight_hook(&mut self, hook: Box<dyn FnMut()>) {
        self.hook = Some(hook);
    }
}
