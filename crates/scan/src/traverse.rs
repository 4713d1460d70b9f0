//! Inline-text-neighbor traversal, shared by sentence extraction and token
//! mapping.
//!
//! The walk follows visual reading order for ordinary flowed text and
//! refuses to cross layout boundaries where tree adjacency stops matching
//! on-screen adjacency: it climbs only through inline-flow parents, and it
//! descends into a sibling only when that subtree is in normal inline flow.
//!
//! Termination is structural: the sibling cursor moves strictly
//! forward/backward at each depth and every climb strictly decreases depth,
//! so previously visited content is never revisited. The iteration cap is a
//! tripwire for a page mutating the tree under us mid-walk, not the
//! termination argument.

use dom::{Dom, NodeId};
use style::{breaks_inline_adjacency, is_inline_flow, is_out_of_flow};

const WALK_CAP: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dir {
    Forward,
    Backward,
}

/// Next text leaf in reading order, or `None` at an inline-flow boundary.
pub fn next_text_leaf(dom: &Dom, from: NodeId) -> Option<NodeId> {
    neighbor_leaf(dom, from, Dir::Forward)
}

/// Previous text leaf in reading order, or `None` at an inline-flow boundary.
pub fn prev_text_leaf(dom: &Dom, from: NodeId) -> Option<NodeId> {
    neighbor_leaf(dom, from, Dir::Backward)
}

fn neighbor_leaf(dom: &Dom, from: NodeId, dir: Dir) -> Option<NodeId> {
    let mut cur = from;
    for _ in 0..WALK_CAP {
        let sibling = match dir {
            Dir::Forward => dom.next_sibling(cur),
            Dir::Backward => dom.prev_sibling(cur),
        };
        match sibling {
            Some(sib) => {
                if let Some(leaf) = edge_text_leaf(dom, sib, dir) {
                    return Some(leaf);
                }
                // subtree yields nothing; treat as absent, keep searching
                cur = sib;
            }
            None => {
                let parent = dom.parent(cur)?;
                if !is_inline_flow(dom, parent) {
                    return None;
                }
                cur = parent;
            }
        }
    }
    log::warn!(
        target: "scan.traverse",
        "neighbor walk exceeded cap at node {:?}; page mutated mid-walk?",
        from
    );
    None
}

/// First (Forward) or last (Backward) text leaf inside `node`'s subtree,
/// skipping out-of-flow content and subtrees whose layout mode breaks inline
/// adjacency. A node that disappeared mid-walk simply yields nothing.
fn edge_text_leaf(dom: &Dom, node: NodeId, dir: Dir) -> Option<NodeId> {
    let mut stack = vec![node];
    for _ in 0..WALK_CAP {
        let cur = stack.pop()?;
        if dom.is_text(cur) {
            return Some(cur);
        }
        if !dom.is_element(cur) {
            continue;
        }
        if is_out_of_flow(dom, cur)
            || breaks_inline_adjacency(dom, cur)
            || !is_inline_flow(dom, cur)
        {
            continue;
        }
        // pop order must visit the near edge first
        let mut children: Vec<NodeId> = dom.children(cur).collect();
        if dir == Dir::Forward {
            children.reverse();
        }
        stack.extend(children);
    }
    log::warn!(target: "scan.traverse", "descent exceeded cap at node {:?}", node);
    None
}
