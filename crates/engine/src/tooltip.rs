//! Tooltip anchor geometry. Content is someone else's problem; the engine
//! only says where the tooltip should attach and on which side of the
//! highlighted text it fits.

use geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipPlacement {
    Above,
    Below,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipAnchor {
    /// The highlighted span's first-line rectangle.
    pub rect: Rect,
    pub placement: TooltipPlacement,
}

/// Anchor on the first (topmost) highlight rect, below it when the upper
/// half of the viewport, above otherwise.
pub fn anchor_for(rects: &[Rect], viewport_h: f32) -> Option<TooltipAnchor> {
    let first = rects
        .iter()
        .copied()
        .min_by(|a, b| (a.y, a.x).partial_cmp(&(b.y, b.x)).unwrap_or(std::cmp::Ordering::Equal))?;
    let placement = if first.y > viewport_h / 2.0 {
        TooltipPlacement::Above
    } else {
        TooltipPlacement::Below
    };
    Some(TooltipAnchor {
        rect: first,
        placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_on_the_topmost_rect() {
        let rects = [
            Rect::new(0.0, 32.0, 40.0, 16.0),
            Rect::new(100.0, 16.0, 30.0, 16.0),
        ];
        let anchor = anchor_for(&rects, 800.0).unwrap();
        assert_eq!(anchor.rect.y, 16.0);
        assert_eq!(anchor.placement, TooltipPlacement::Below);
    }

    #[test]
    fn flips_above_in_the_lower_half() {
        let rects = [Rect::new(0.0, 700.0, 40.0, 16.0)];
        let anchor = anchor_for(&rects, 800.0).unwrap();
        assert_eq!(anchor.placement, TooltipPlacement::Above);
    }

    #[test]
    fn no_rects_no_anchor() {
        assert_eq!(anchor_for(&[], 800.0), None);
    }
}
