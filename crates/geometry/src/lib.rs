pub mod line;
pub mod rect;

pub use crate::line::LineGeometry;
pub use crate::rect::{Rect, merge_line_rects};

use dom::{Dom, NodeId};

/// Read-only geometry queries against the host document.
///
/// This is the seam between the engine and whatever actually laid the page
/// out: a real host answers from its layout tree, tests and headless hosts
/// answer from [`LineGeometry`]. All offsets are character indices into the
/// text node.
pub trait TextGeometry {
    /// Topmost element under the point, if any of its text is rendered there.
    fn element_at(&self, dom: &Dom, x: f32, y: f32) -> Option<NodeId>;

    /// Client rectangles of the character range `[start, end)` of a text
    /// node, one rect per rendered line. Empty when the node is gone, not a
    /// text node, or the range is empty.
    fn range_rects(&self, dom: &Dom, node: NodeId, start: usize, end: usize) -> Vec<Rect>;

    /// Rectangles of the node's full content.
    fn node_rects(&self, dom: &Dom, node: NodeId) -> Vec<Rect> {
        match dom.text_char_len(node) {
            Some(len) => self.range_rects(dom, node, 0, len),
            None => Vec::new(),
        }
    }
}
