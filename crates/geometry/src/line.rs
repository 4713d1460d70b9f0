//! Deterministic character-grid geometry.
//!
//! Reference [`TextGeometry`] implementation for tests and headless hosts:
//! every character occupies a fixed-advance box, lines wrap at a fixed
//! column count, block-level elements start on a fresh line, and out-of-flow
//! subtrees (hidden, ruby text, positioned) render nothing. Geometry is
//! recomputed from the live tree on every query, so node splits and marker
//! wraps are reflected immediately.

use crate::rect::Rect;
use crate::TextGeometry;
use dom::{Dom, NodeId};
use style::{Display, Position, computed};

pub struct LineGeometry {
    pub cols: usize,
    pub char_w: f32,
    pub line_h: f32,
}

impl LineGeometry {
    pub fn new(cols: usize) -> Self {
        LineGeometry {
            cols,
            char_w: 10.0,
            line_h: 16.0,
        }
    }

    fn each_char_rect(&self, dom: &Dom, f: &mut dyn FnMut(NodeId, usize, Rect)) {
        let mut cursor = Cursor { col: 0, row: 0 };
        self.walk(dom, dom.root(), &mut cursor, f);
    }

    fn walk(
        &self,
        dom: &Dom,
        id: NodeId,
        cursor: &mut Cursor,
        f: &mut dyn FnMut(NodeId, usize, Rect),
    ) {
        if let Some(text) = dom.text(id) {
            for (i, _) in text.chars().enumerate() {
                if cursor.col >= self.cols {
                    cursor.col = 0;
                    cursor.row += 1;
                }
                let rect = Rect::new(
                    cursor.col as f32 * self.char_w,
                    cursor.row as f32 * self.line_h,
                    self.char_w,
                    self.line_h,
                );
                f(id, i, rect);
                cursor.col += 1;
            }
            return;
        }

        let style = computed(dom, id);
        if dom.is_element(id) {
            let hidden = matches!(style.display, Display::None | Display::RubyText)
                || dom
                    .element_name(id)
                    .is_some_and(|n| n == "rt" || n == "rp")
                || matches!(
                    style.position,
                    Position::Absolute | Position::Fixed | Position::Sticky
                );
            if hidden {
                return;
            }
        }
        let block = dom.is_element(id)
            && matches!(
                style.display,
                Display::Block | Display::ListItem | Display::Flex | Display::Grid
            );
        if block {
            cursor.break_line();
        }
        let mut child = dom.first_child(id);
        while let Some(c) = child {
            self.walk(dom, c, cursor, f);
            child = dom.next_sibling(c);
        }
        if block {
            cursor.break_line();
        }
    }
}

struct Cursor {
    col: usize,
    row: usize,
}

impl Cursor {
    fn break_line(&mut self) {
        if self.col > 0 {
            self.col = 0;
            self.row += 1;
        }
    }
}

impl TextGeometry for LineGeometry {
    fn element_at(&self, dom: &Dom, x: f32, y: f32) -> Option<NodeId> {
        let mut hit = None;
        self.each_char_rect(dom, &mut |node, _, rect| {
            if hit.is_none() && rect.contains(x, y) {
                hit = dom.parent(node);
            }
        });
        hit
    }

    fn range_rects(&self, dom: &Dom, node: NodeId, start: usize, end: usize) -> Vec<Rect> {
        let mut out: Vec<Rect> = Vec::new();
        self.each_char_rect(dom, &mut |n, i, rect| {
            if n != node || i < start || i >= end {
                return;
            }
            match out.last_mut() {
                // extend the current line's rect while chars stay on one row
                Some(last) if last.y == rect.y && rect.x <= last.right() + 0.5 => {
                    last.width = rect.right() - last.x;
                }
                _ => out.push(rect),
            }
        });
        out
    }
}
