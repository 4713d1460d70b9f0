//! Token-to-NodeSpan mapping: given where a token sits relative to the
//! anchor character, compute the ordered leaves that carry exactly the
//! token's characters, splitting the boundary leaves where the token edges
//! fall mid-leaf.
//!
//! Splits run suffix side first, then prefix side, so every split uses
//! offsets that are still valid in the node being cut. Neither side touches
//! any node outside the token's leaves.

use crate::traverse::{next_text_leaf, prev_text_leaf};
use crate::types::{CharLocation, NodeSpan};
use dom::{Dom, NodeId};

/// Map a token onto the tree. `token_len` is the token's length in
/// characters; `token_offset` is how many of those characters lie strictly
/// before the anchor character. Returns the span in document order; when the
/// document ends mid-token the span covers what exists (defensive
/// truncation), and a vanished anchor yields an empty span.
pub fn map_token(
    dom: &mut Dom,
    anchor: CharLocation,
    token_len: usize,
    token_offset: usize,
) -> NodeSpan {
    let Some(leaf_len) = dom.text_char_len(anchor.node) else {
        return Vec::new();
    };
    if anchor.char_at >= leaf_len || token_offset >= token_len {
        log::warn!(
            target: "scan.map",
            "inconsistent token map request: char_at {} of {}, offset {} of {}",
            anchor.char_at, leaf_len, token_offset, token_len
        );
        return Vec::new();
    }

    // Suffix side: the token's trailing characters, anchor char included.
    let suffix_len = token_len - token_offset;
    let end_in_leaf = anchor.char_at + suffix_len;
    let mut suffix: Vec<NodeId> = Vec::new();
    if end_in_leaf < leaf_len {
        // token ends inside the anchor leaf; cut the tail off
        dom.split_text(anchor.node, end_in_leaf);
    } else if end_in_leaf > leaf_len {
        let mut remaining = end_in_leaf - leaf_len;
        let mut cur = anchor.node;
        while remaining > 0 {
            let Some(next) = next_text_leaf(dom, cur) else {
                log::debug!(
                    target: "scan.map",
                    "document ends {} chars short of the token; truncating",
                    remaining
                );
                break;
            };
            let len = dom.text_char_len(next).unwrap_or(0);
            if remaining < len {
                dom.split_text(next, remaining);
                suffix.push(next);
                remaining = 0;
            } else {
                if len > 0 {
                    suffix.push(next);
                }
                remaining -= len;
                cur = next;
            }
        }
    }

    // Prefix side: characters before the anchor char.
    let mut token_anchor = anchor.node;
    let mut prefix: Vec<NodeId> = Vec::new();
    if token_offset <= anchor.char_at {
        let start_in_leaf = anchor.char_at - token_offset;
        if start_in_leaf > 0 {
            match dom.split_text(anchor.node, start_in_leaf) {
                Some(tail) => token_anchor = tail,
                None => {
                    log::warn!(target: "scan.map", "anchor split failed; span kept whole");
                }
            }
        }
    } else {
        // token begins in earlier leaves; the anchor leaf is covered from 0
        let mut remaining = token_offset - anchor.char_at;
        let mut cur = anchor.node;
        while remaining > 0 {
            let Some(prev) = prev_text_leaf(dom, cur) else {
                log::debug!(
                    target: "scan.map",
                    "document starts {} chars short of the token; truncating",
                    remaining
                );
                break;
            };
            let len = dom.text_char_len(prev).unwrap_or(0);
            if remaining < len {
                if let Some(tail) = dom.split_text(prev, len - remaining) {
                    prefix.push(tail);
                }
                remaining = 0;
            } else {
                if len > 0 {
                    prefix.push(prev);
                }
                remaining -= len;
                cur = prev;
            }
        }
    }

    prefix.reverse();
    prefix.push(token_anchor);
    prefix.extend(suffix);
    prefix
}

/// Concatenated text of a span, in order.
pub fn span_text(dom: &Dom, span: &[NodeId]) -> String {
    span.iter()
        .filter_map(|&id| dom.text(id))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharLocation;
    use dom::{Dom, NodeId};

    fn leaf(dom: &mut Dom, parent: NodeId, text: &str) -> NodeId {
        let t = dom.create_text(text);
        dom.append_child(parent, t);
        t
    }

    fn paragraph(dom: &mut Dom) -> NodeId {
        let p = dom.create_element("p");
        let root = dom.root();
        dom.append_child(root, p);
        p
    }

    #[test]
    fn partial_leaf_token_splits_into_three_parts() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let t = leaf(&mut dom, p, "あいうえお");

        // 2-char token "いう" starting at offset 1, anchored on "い"
        let span = map_token(&mut dom, CharLocation { node: t, char_at: 1 }, 2, 0);
        assert_eq!(span.len(), 1);
        assert_eq!(span_text(&dom, &span), "いう");
        assert_eq!(dom.children(p).count(), 3);
        assert_eq!(dom.subtree_text(p), "あいうえお");
    }

    #[test]
    fn token_ending_at_leaf_boundary_needs_no_split() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let t = leaf(&mut dom, p, "読書");

        let span = map_token(&mut dom, CharLocation { node: t, char_at: 0 }, 2, 0);
        assert_eq!(span, vec![t]);
        assert_eq!(dom.children(p).count(), 1);
    }

    #[test]
    fn token_spans_following_leaves() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let a = leaf(&mut dom, p, "楽し");
        let b = leaf(&mut dom, p, "い活動");

        // token "楽しい", anchored on "楽"
        let span = map_token(&mut dom, CharLocation { node: a, char_at: 0 }, 3, 0);
        assert_eq!(span_text(&dom, &span), "楽しい");
        assert_eq!(span[0], a);
        // "い" was split off the front of the second leaf
        assert_eq!(span[1], b);
        assert_eq!(dom.text(b), Some("い"));
        assert_eq!(dom.subtree_text(p), "楽しい活動");
    }

    #[test]
    fn token_spans_preceding_leaves() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let a = leaf(&mut dom, p, "読書は楽");
        let b = leaf(&mut dom, p, "しい");

        // token "楽しい" anchored on "し" (second leaf), one char before it
        let span = map_token(&mut dom, CharLocation { node: b, char_at: 0 }, 3, 1);
        assert_eq!(span_text(&dom, &span), "楽しい");
        assert_eq!(span.len(), 2);
        // the prefix leaf was split so only "楽" is in the span
        assert_eq!(dom.text(span[0]), Some("楽"));
        assert_eq!(span[1], b);
        assert_eq!(dom.text(a), Some("読書は"));
        assert_eq!(dom.subtree_text(p), "読書は楽しい");
    }

    #[test]
    fn token_across_inline_wrappers_tiles_exactly() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let a = leaf(&mut dom, p, "読書は楽");
        let i = dom.create_element("i");
        dom.append_child(p, i);
        let b = leaf(&mut dom, i, "し");
        let c = leaf(&mut dom, p, "い活動");

        let span = map_token(&mut dom, CharLocation { node: b, char_at: 0 }, 3, 1);
        assert_eq!(span_text(&dom, &span), "楽しい");
        assert_eq!(span.len(), 3);
        assert_eq!(span[1], b);
        assert_eq!(span[2], c);
        assert_eq!(dom.text(a), Some("読書は"));
        assert_eq!(dom.text(c), Some("い"));
        assert_eq!(dom.subtree_text(p), "読書は楽しい活動");
    }

    #[test]
    fn truncates_when_document_ends_mid_token() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let t = leaf(&mut dom, p, "楽し");

        let span = map_token(&mut dom, CharLocation { node: t, char_at: 0 }, 5, 0);
        assert_eq!(span_text(&dom, &span), "楽し");
    }

    #[test]
    fn vanished_anchor_yields_empty_span() {
        let mut dom = Dom::new();
        let p = paragraph(&mut dom);
        let t = leaf(&mut dom, p, "消える");
        dom.remove(t);
        let span = map_token(&mut dom, CharLocation { node: t, char_at: 0 }, 2, 0);
        assert!(span.is_empty());
    }
}
