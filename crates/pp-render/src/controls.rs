//! Floating control cluster for the selected frame.
//!
//! The cluster sits centred under the frame. It is clamped horizontally so
//! it never leaves the stage and flips above the frame when there is not
//! enough room below. On a stage too narrow for the full cluster it shrinks
//! to the padded stage width.

use pp_core::StageSize;
use pp_core::model::Bounds;

pub const CONTROL_WIDTH: f32 = 240.0;
pub const CONTROL_HEIGHT: f32 = 36.0;
/// Minimum distance kept from the stage edge.
pub const CONTROL_PADDING: f32 = 12.0;
/// Distance between the frame edge and the cluster.
pub const CONTROL_GAP: f32 = 12.0;

/// Buttons in the cluster, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    BringToFront,
    SendToBack,
    Duplicate,
    Delete,
}

impl ControlAction {
    pub const ALL: [ControlAction; 4] = [
        ControlAction::BringToFront,
        ControlAction::SendToBack,
        ControlAction::Duplicate,
        ControlAction::Delete,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        ControlAction::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Stable name used across the JS bridge.
    pub fn name(self) -> &'static str {
        match self {
            ControlAction::BringToFront => "front",
            ControlAction::SendToBack => "back",
            ControlAction::Duplicate => "duplicate",
            ControlAction::Delete => "delete",
        }
    }
}

/// Where to draw the cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCluster {
    /// Horizontal centre of the cluster.
    pub center_x: f32,
    /// Rendered width, at most [`CONTROL_WIDTH`].
    pub width: f32,
    /// Top edge of the cluster.
    pub top: f32,
    /// True when the cluster was flipped above the frame.
    pub above: bool,
}

impl ControlCluster {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.center_x - self.width / 2.0,
            self.top,
            self.width,
            CONTROL_HEIGHT,
        )
    }
}

/// Place the cluster for a frame with on-stage bounds `frame`.
///
/// Returns `None` until the stage has been laid out.
pub fn place_controls(frame: &Bounds, stage: StageSize) -> Option<ControlCluster> {
    if stage.is_empty() {
        return None;
    }
    let width = CONTROL_WIDTH.min(stage.width - 2.0 * CONTROL_PADDING).max(0.0);
    let half = width / 2.0;
    let (center_x, _) = frame.center();
    let center_x = center_x
        .max(half + CONTROL_PADDING)
        .min(stage.width - half - CONTROL_PADDING);

    let below = frame.bottom() + CONTROL_GAP;
    if below + CONTROL_HEIGHT + CONTROL_PADDING > stage.height {
        let top = (frame.y - CONTROL_HEIGHT - CONTROL_GAP).max(CONTROL_PADDING);
        Some(ControlCluster {
            center_x,
            width,
            top,
            above: true,
        })
    } else {
        Some(ControlCluster {
            center_x,
            width,
            top: below,
            above: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGE: StageSize = StageSize::new(600.0, 600.0);

    #[test]
    fn sits_centred_below_frame() {
        let c = place_controls(&Bounds::new(200.0, 100.0, 200.0, 100.0), STAGE).unwrap();
        assert_eq!(c.center_x, 300.0);
        assert_eq!(c.top, 212.0);
        assert!(!c.above);
    }

    #[test]
    fn clamps_to_left_and_right_edges() {
        let left = place_controls(&Bounds::new(0.0, 0.0, 40.0, 40.0), STAGE).unwrap();
        assert_eq!(left.center_x, 132.0);
        assert!(left.bounds().x >= CONTROL_PADDING);

        let right = place_controls(&Bounds::new(560.0, 0.0, 40.0, 40.0), STAGE).unwrap();
        assert_eq!(right.center_x, 468.0);
        assert!(right.bounds().right() <= STAGE.width - CONTROL_PADDING);
    }

    #[test]
    fn narrow_stage_shrinks_cluster_inside_edges() {
        let narrow = StageSize::new(225.0, 400.0);
        let c = place_controls(&Bounds::new(20.0, 20.0, 80.0, 80.0), narrow).unwrap();
        let b = c.bounds();
        assert_eq!(c.width, 201.0);
        assert_eq!(c.center_x, 112.5);
        assert!(b.x >= 0.0);
        assert!(b.right() <= narrow.width);
    }

    #[test]
    fn flips_above_when_no_room_below() {
        let c = place_controls(&Bounds::new(200.0, 400.0, 100.0, 160.0), STAGE).unwrap();
        assert!(c.above);
        assert_eq!(c.top, 400.0 - 36.0 - 12.0);
    }

    #[test]
    fn flipped_cluster_never_leaves_top() {
        let c = place_controls(&Bounds::new(0.0, 10.0, 600.0, 580.0), STAGE).unwrap();
        assert!(c.above);
        assert_eq!(c.top, CONTROL_PADDING);
    }

    #[test]
    fn unlaid_stage_has_no_cluster() {
        assert!(place_controls(&Bounds::new(0.0, 0.0, 1.0, 1.0), StageSize::default()).is_none());
    }

    #[test]
    fn action_names_roundtrip() {
        for a in ControlAction::ALL {
            assert_eq!(ControlAction::parse(a.name()), Some(a));
        }
        assert_eq!(ControlAction::parse("rotate"), None);
    }
}
