//! Visual marking of a token's node span, with two interchangeable
//! strategies behind one capability trait.
//!
//! The strategy is chosen once at startup from what the host environment can
//! do cleanly and never changes at runtime. Exactly one highlight may be
//! active per document; a new `highlight` call replaces the previous one.

pub mod selection;
pub mod wrap;

pub use crate::selection::SelectionHighlight;
pub use crate::wrap::WrapHighlight;

use dom::{Dom, NodeId};
use geometry::{Rect, TextGeometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    Selection,
    Wrap,
}

/// Marking strategy contract.
///
/// `unhighlight` and `sync` fire the unhighlight hook when they move the
/// state to idle; replacing an active highlight with a new one fires it too
/// (the old mark is gone before the new one appears). The hook is how the
/// tooltip layer learns it should hide.
pub trait Highlight {
    fn highlight(&mut self, dom: &mut Dom, nodes: &[NodeId]);

    /// Variant used when the dictionary had no entries for the token: the
    /// span is still marked, in a distinct color, but no tooltip follows.
    fn highlight_red(&mut self, dom: &mut Dom, nodes: &[NodeId]);

    fn unhighlight(&mut self, dom: &mut Dom);

    fn is_active(&self) -> bool;

    /// True for every node/offset inside the most recent highlight's span.
    fn is_highlighted(&self, dom: &Dom, node: NodeId, char_idx: Option<usize>) -> bool;

    /// On-screen rectangles of the current mark, one per visual line
    /// (horizontally adjacent same-line rects are merged).
    fn rects(&self, dom: &Dom, geometry: &dyn TextGeometry) -> Vec<Rect>;

    /// Observe external state (the selection strategy watches for selection
    /// changes it did not make). Call before reading `is_active`.
    fn sync(&mut self, dom: &mut Dom);

    fn kind(&self) -> HighlightKind;

    fn set_unhighlight_hook(&mut self, hook: Box<dyn FnMut()>);
}

/// What the host environment supports; fixed at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvCapabilities {
    /// Whether programmatic native selection (and styling it) works cleanly.
    pub native_selection: bool,
}

pub fn for_env(caps: &EnvCapabilities) -> Box<dyn Highlight> {
    if caps.native_selection {
        Box::new(SelectionHighlight::new())
    } else {
        Box::new(WrapHighlight::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_follows_environment() {
        let sel = for_env(&EnvCapabilities {
            native_selection: true,
        });
        assert_eq!(sel.kind(), HighlightKind::Selection);
        let wrap = for_env(&EnvCapabilities {
            native_selection: false,
        });
        assert_eq!(wrap.kind(), HighlightKind::Wrap);
    }
}
