//! Geometry locator: viewport point to character location.
//!
//! Rectangle containment is not monotonic across a bisection when the host
//! renders bidi runs or ligatures, so binary search is only used to narrow
//! the candidate window; the final decision is a linear scan of
//! single-character rects. The window size at which the switch happens is an
//! empirical tuning parameter, exposed as a field.

use crate::types::CharLocation;
use dom::Dom;
use geometry::{Rect, TextGeometry};

pub const DEFAULT_LINEAR_SPAN: usize = 4;

/// Point-to-character locator with an advisory last-hit cache.
///
/// The cache is purely a fast path: it is re-validated against the live
/// tree and geometry before use and may be invalidated at will.
pub struct CharLocator {
    pub linear_span: usize,
    last_hit: Option<(CharLocation, Rect)>,
}

impl CharLocator {
    pub fn new() -> Self {
        CharLocator {
            linear_span: DEFAULT_LINEAR_SPAN,
            last_hit: None,
        }
    }

    pub fn invalidate(&mut self) {
        self.last_hit = None;
    }

    pub fn locate(
        &mut self,
        dom: &Dom,
        geometry: &dyn TextGeometry,
        x: f32,
        y: f32,
    ) -> Option<CharLocation> {
        if let Some(hit) = self.cached_hit(dom, geometry, x, y) {
            return Some(hit);
        }

        let element = geometry.element_at(dom, x, y)?;
        let leaf = dom.children(element).find(|&child| {
            dom.is_text(child)
                && geometry
                    .node_rects(dom, child)
                    .iter()
                    .any(|r| r.contains(x, y))
        })?;
        let len = dom.text_char_len(leaf)?;
        if len == 0 {
            return None;
        }

        // narrow by bisection, decide by linear scan
        let (mut start, mut end) = (0usize, len);
        while end - start > self.linear_span.max(1) {
            let mid = start + (end - start) / 2;
            let in_head = geometry
                .range_rects(dom, leaf, start, mid)
                .iter()
                .any(|r| r.contains(x, y));
            if in_head {
                end = mid;
            } else {
                start = mid;
            }
        }
        for i in start..end {
            let rects = geometry.range_rects(dom, leaf, i, i + 1);
            if let Some(rect) = rects.iter().find(|r| r.contains(x, y)) {
                let loc = CharLocation {
                    node: leaf,
                    char_at: i,
                };
                self.last_hit = Some((loc, *rect));
                log::trace!(target: "scan.locate", "({x}, {y}) -> {:?}", loc);
                return Some(loc);
            }
        }
        None
    }

    fn cached_hit(
        &mut self,
        dom: &Dom,
        geometry: &dyn TextGeometry,
        x: f32,
        y: f32,
    ) -> Option<CharLocation> {
        let (loc, rect) = self.last_hit?;
        if !rect.contains(x, y) {
            return None;
        }
        // the page may have moved or removed the leaf since
        let still_valid = dom.text_char_len(loc.node).is_some_and(|len| {
            loc.char_at < len
                && geometry
                    .range_rects(dom, loc.node, loc.char_at, loc.char_at + 1)
                    .iter()
                    .any(|r| r.contains(x, y))
        });
        if still_valid {
            Some(loc)
        } else {
            self.last_hit = None;
            None
        }
    }
}

impl Default for CharLocator {
    fn default() -> Self {
        Self::new()
    }
}
