/// A rectangle in CSS px, viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: a point on the shared edge of two adjacent
    /// character boxes belongs to the right/lower one only.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

const MERGE_EPS: f32 = 0.5;

/// Merge horizontally-adjacent rects sitting on the same line into one, so a
/// span split across several leaves reports one rectangle per visual line
/// instead of one per leaf. Input order is free; output is line-major.
pub fn merge_line_rects(mut rects: Vec<Rect>) -> Vec<Rect> {
    rects.sort_by(|a, b| {
        (a.y, a.x)
            .partial_cmp(&(b.y, b.x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut out: Vec<Rect> = Vec::new();
    for r in rects {
        if r.width <= 0.0 || r.height <= 0.0 {
            continue;
        }
        match out.last_mut() {
            Some(last)
                if (last.y - r.y).abs() <= MERGE_EPS
                    && (last.height - r.height).abs() <= MERGE_EPS
                    && r.x <= last.right() + MERGE_EPS =>
            {
                let right = last.right().max(r.right());
                last.width = right - last.x;
            }
            _ => out.push(r),
        }
    }
    out
}
