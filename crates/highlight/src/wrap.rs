//! Wrap-based highlighting for hosts where styling the native selection is
//! unreliable: each leaf of the span is reparented into a dedicated marker
//! element, and unhighlighting unwraps the markers and re-normalizes the
//! parents so the text-node structure is restored.

use crate::{Highlight, HighlightKind};
use dom::{Dom, NodeId};
use geometry::{Rect, TextGeometry, merge_line_rects};

/// Tag of the synthetic wrapper; inline by default, so it never disturbs
/// flow.
pub const MARKER_TAG: &str = "mark";
/// Attribute identifying our markers (and their variant) among any `mark`
/// elements the page itself may contain.
pub const MARKER_ATTR: &str = "data-scan-marker";

const VARIANT_TOKEN: &str = "token";
const VARIANT_UNKNOWN: &str = "unknown";

pub struct WrapHighlight {
    markers: Vec<NodeId>,
    hook: Option<Box<dyn FnMut()>>,
}

impl WrapHighlight {
    pub fn new() -> Self {
        WrapHighlight {
            markers: Vec::new(),
            hook: None,
        }
    }

    fn apply(&mut self, dom: &mut Dom, nodes: &[NodeId], variant: &str) {
        if self.is_active() {
            self.clear(dom);
            self.fire_hook();
        }
        for &node in nodes {
            if !dom.is_text(node) {
                // the page may have replaced the leaf since mapping
                continue;
            }
            let marker = dom.create_element_with(
                MARKER_TAG,
                vec![(MARKER_ATTR.to_string(), Some(variant.to_string()))],
                Vec::new(),
            );
            if dom.wrap(node, marker) {
                self.markers.push(marker);
            } else {
                dom.remove(marker);
            }
        }
        log::debug!(target: "highlight", "wrapped {} leaves ({variant})", self.markers.len());
    }

    /// Unwrap all markers and merge the leaf fragments back together.
    fn clear(&mut self, dom: &mut Dom) {
        for marker in std::mem::take(&mut self.markers) {
            let parent = dom.parent(marker);
            if dom.unwrap(marker) {
                if let Some(parent) = parent {
                    dom.normalize(parent);
                }
            }
        }
    }

    fn fire_hook(&mut self) {
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
    }
}

impl Default for WrapHighlight {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlight for WrapHighlight {
    fn highlight(&mut self, dom: &mut Dom, nodes: &[NodeId]) {
        self.apply(dom, nodes, VARIANT_TOKEN);
    }

    fn highlight_red(&mut self, dom: &mut Dom, nodes: &[NodeId]) {
        self.apply(dom, nodes, VARIANT_UNKNOWN);
    }

    fn unhighlight(&mut self, dom: &mut Dom) {
        if !self.is_active() {
            return;
        }
        self.clear(dom);
        self.fire_hook();
    }

    fn is_active(&self) -> bool {
        !self.markers.is_empty()
    }

    fn is_highlighted(&self, dom: &Dom, node: NodeId, char_idx: Option<usize>) -> bool {
        let inside = self
            .markers
            .iter()
            .any(|&m| m == node || dom.parent(node) == Some(m));
        if !inside {
            return false;
        }
        match char_idx {
            Some(idx) => dom.text_char_len(node).is_some_and(|len| idx < len),
            None => true,
        }
    }

    fn rects(&self, dom: &Dom, geometry: &dyn TextGeometry) -> Vec<Rect> {
        let rects = self
            .markers
            .iter()
            .flat_map(|&m| dom.children(m).collect::<Vec<_>>())
            .flat_map(|leaf| geometry.node_rects(dom, leaf))
            .collect();
        merge_line_rects(rects)
    }

    fn sync(&mut self, _dom: &mut Dom) {
        // wrap markers cannot be deselected out from under us
    }

    fn kind(&self) -> HighlightKind {
        HighlightKind::Wrap
    }

    fn set_unhighlight_hook(&mut self, hook: Box<dyn FnMut()>) {
        self.hook = Some(hook);
    }
}
