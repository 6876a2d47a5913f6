//! Transform handles for the selected frame.
//!
//! Eight anchors (four corners, four edge midpoints) and no rotation
//! anchor. Resizing moves only the edges an anchor owns; the opposite
//! edges stay put, and neither dimension may drop below
//! [`MIN_FRAME_SIZE`].

use pp_core::model::Bounds;
use smallvec::SmallVec;

/// Smallest width/height an interactive resize may produce.
pub const MIN_FRAME_SIZE: f32 = 40.0;

/// Side length of an anchor square, in stage units.
pub const ANCHOR_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleRight,
    BottomRight,
    BottomCenter,
    BottomLeft,
    MiddleLeft,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopCenter,
        Handle::TopRight,
        Handle::MiddleRight,
        Handle::BottomRight,
        Handle::BottomCenter,
        Handle::BottomLeft,
        Handle::MiddleLeft,
    ];

    fn moves_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::MiddleLeft | Handle::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            Handle::TopRight | Handle::MiddleRight | Handle::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopCenter | Handle::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            Handle::BottomLeft | Handle::BottomCenter | Handle::BottomRight
        )
    }

    /// Anchor centre on the given box.
    pub fn position(self, b: &Bounds) -> (f32, f32) {
        let x = if self.moves_left() {
            b.x
        } else if self.moves_right() {
            b.right()
        } else {
            b.x + b.width / 2.0
        };
        let y = if self.moves_top() {
            b.y
        } else if self.moves_bottom() {
            b.bottom()
        } else {
            b.y + b.height / 2.0
        };
        (x, y)
    }

    /// CSS cursor name for hover feedback.
    pub fn cursor(self) -> &'static str {
        match self {
            Handle::TopLeft | Handle::BottomRight => "nwse-resize",
            Handle::TopRight | Handle::BottomLeft => "nesw-resize",
            Handle::TopCenter | Handle::BottomCenter => "ns-resize",
            Handle::MiddleLeft | Handle::MiddleRight => "ew-resize",
        }
    }
}

/// Anchor squares for a box, in paint order.
pub fn anchor_rects(b: &Bounds) -> SmallVec<[(Handle, Bounds); 8]> {
    Handle::ALL
        .iter()
        .map(|&h| {
            let (cx, cy) = h.position(b);
            let half = ANCHOR_SIZE / 2.0;
            (h, Bounds::new(cx - half, cy - half, ANCHOR_SIZE, ANCHOR_SIZE))
        })
        .collect()
}

/// Resize `start` by dragging `handle` by (`dx`, `dy`).
///
/// Edges the handle does not own are fixed. When a dimension would fall
/// under [`MIN_FRAME_SIZE`] it is clamped to exactly that size, measured
/// from the fixed edge.
pub fn resize_with_handle(start: &Bounds, handle: Handle, dx: f32, dy: f32) -> Bounds {
    let mut left = start.x;
    let mut right = start.right();
    let mut top = start.y;
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left = (left + dx).min(right - MIN_FRAME_SIZE);
    }
    if handle.moves_right() {
        right = (right + dx).max(left + MIN_FRAME_SIZE);
    }
    if handle.moves_top() {
        top = (top + dy).min(bottom - MIN_FRAME_SIZE);
    }
    if handle.moves_bottom() {
        bottom = (bottom + dy).max(top + MIN_FRAME_SIZE);
    }

    Bounds::new(left, top, right - left, bottom - top)
}
