//! Flow predicates for inline-text-neighbor traversal.
//!
//! "Inline-flow" means a node keeps flowing within a line of text; only such
//! parents may be climbed when looking for the previous/next leaf, so that
//! tree adjacency keeps matching visual reading order. "Out-of-flow" subtrees
//! (hidden, ruby annotation text, absolutely positioned) are invisible to
//! traversal entirely.

use crate::values::{Display, Position, computed};
use dom::{Dom, NodeId};

/// True when `id` may be climbed through while searching for a sibling:
/// inline-like display, in normal flow, and not a line break.
pub fn is_inline_flow(dom: &Dom, id: NodeId) -> bool {
    if dom.is_text(id) {
        return true;
    }
    if dom.element_name(id).is_some_and(|n| n == "br") {
        return false;
    }
    let style = computed(dom, id);
    let inline_display = matches!(
        style.display,
        Display::Inline | Display::Ruby | Display::RubyBase
    );
    let in_flow = matches!(style.position, Position::Static | Position::Relative);
    inline_display && in_flow
}

/// True when `id`'s subtree is removed from normal text flow and must be
/// skipped: hidden, ruby annotation text, or positioned out of flow.
pub fn is_out_of_flow(dom: &Dom, id: NodeId) -> bool {
    if dom.is_text(id) {
        return false;
    }
    if dom
        .element_name(id)
        .is_some_and(|n| n == "rt" || n == "rp")
    {
        return true;
    }
    let style = computed(dom, id);
    matches!(style.display, Display::None | Display::RubyText)
        || matches!(
            style.position,
            Position::Absolute | Position::Fixed | Position::Sticky
        )
}

/// True when `id` uses a layout mode whose children are not inline-adjacent
/// to surrounding text; traversal must not descend through it.
pub fn breaks_inline_adjacency(dom: &Dom, id: NodeId) -> bool {
    matches!(computed(dom, id).display, Display::Flex | Display::Grid)
}
