//! Drag-to-reorder state machine
//!
//! A press arms the gesture; it starts moving only once the pointer
//! leaves the sensitivity radius, so plain clicks never reorder. While
//! moving, the dragged tab's clamped horizontal offset is divided into
//! slots of half a tab width (biased toward the direction of motion) and
//! the whole slots crossed become a proposed bump. Only a bump the model
//! accepts rebases the reference point; a rejected bump leaves it where
//! it was, so the next proposal needs fresh deliberate travel.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Presentation-tuning constants for the drag gesture.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Pointer travel required before a press becomes a drag, and before
    /// another bump can follow an accepted one.
    pub sensitivity_radius: f32,
    /// Widens a slot in the direction of motion so a tab must clearly
    /// cross a boundary before it bumps.
    pub step_bias: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            sensitivity_radius: 10.0,
            step_bias: 10.0,
        }
    }
}

/// One pointer-move measurement, supplied by the host's layout provider.
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub pointer: Point,
    /// The dragged tab's untransformed box within the strip.
    pub tab_box: Rect,
    /// The strip's own box.
    pub strip_box: Rect,
}

/// What one sample produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Horizontal translation to present on the dragged element. Purely
    /// visual between frames; the strip order is the only order truth.
    pub translate_x: f32,
    /// Whether the gesture has left the sensitivity radius.
    pub moving: bool,
}

impl DragFrame {
    const IDLE: DragFrame = DragFrame {
        translate_x: 0.0,
        moving: false,
    };
}

/// State of one in-progress drag.
#[derive(Debug, Clone)]
pub struct DragGesture {
    config: GestureConfig,
    /// The press origin, rebased to the pointer position after every
    /// accepted bump.
    origin: Point,
    /// Pointer x relative to the tab's left edge at press time.
    grab_x: f32,
    moving: bool,
}

impl DragGesture {
    /// Start tracking a press. `tab_left` is the tab's untransformed left
    /// offset at press time.
    pub fn begin(config: GestureConfig, pointer: Point, tab_left: f32) -> Self {
        Self {
            config,
            origin: pointer,
            grab_x: pointer.x - tab_left,
            moving: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Feed one pointer-move sample. `bump` is offered the signed slot
    /// count the pointer has crossed and reports whether the model
    /// applied it. Unmeasured geometry skips the sample entirely; the
    /// next one retries.
    pub fn on_pointer_move(
        &mut self,
        sample: PointerSample,
        bump: impl FnOnce(i32) -> bool,
    ) -> DragFrame {
        if sample.tab_box.is_unmeasured() || sample.strip_box.is_unmeasured() {
            return DragFrame {
                translate_x: 0.0,
                moving: self.moving,
            };
        }

        if !self.moving {
            if sample.pointer.distance(self.origin) <= self.config.sensitivity_radius {
                return DragFrame::IDLE;
            }
            self.moving = true;
        }

        let offset = self.clamped_offset(&sample);
        let step = sample.tab_box.width / 2.0
            + if offset > 0.0 {
                self.config.step_bias
            } else {
                -self.config.step_bias
            };

        // A tab narrower than twice the bias has no leftward slot.
        let bump_by = if step > 0.0 {
            (offset / step).trunc() as i32
        } else {
            0
        };

        let from_origin = (self.origin.x - sample.pointer.x).abs();

        if bump_by != 0 && from_origin > self.config.sensitivity_radius && bump(bump_by) {
            self.origin = sample.pointer;
            tracing::debug!(bump_by, "Reorder bump accepted");
        }

        DragFrame {
            translate_x: offset,
            moving: true,
        }
    }

    /// End the drag: armed/moving state clears and the presentational
    /// transform resets to zero. The committed strip order stands.
    pub fn finish(&mut self) -> DragFrame {
        self.moving = false;
        DragFrame::IDLE
    }

    /// Keep the dragged element inside the strip: never before the left
    /// edge, never past the right edge minus the element's own width.
    fn clamped_offset(&self, sample: &PointerSample) -> f32 {
        let desired = sample.pointer.x - self.grab_x - sample.tab_box.x;
        let min = sample.strip_box.x - sample.tab_box.x;
        let max = sample.strip_box.right() - sample.tab_box.x - sample.tab_box.width;
        desired.min(max).max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: GestureConfig = GestureConfig {
        sensitivity_radius: 10.0,
        step_bias: 10.0,
    };

    // Strip of 200 px holding two 100 px tabs; the dragged tab sits at
    // index 0 unless a test says otherwise.
    fn sample(pointer: Point, tab_x: f32) -> PointerSample {
        PointerSample {
            pointer,
            tab_box: Rect::new(tab_x, 0.0, 100.0, 30.0),
            strip_box: Rect::new(0.0, 0.0, 200.0, 30.0),
        }
    }

    #[test]
    fn test_click_inside_radius_emits_nothing() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        let frame = gesture.on_pointer_move(sample(Point::new(15.0, 12.0), 0.0), |_| {
            panic!("no bump expected inside the sensitivity radius")
        });

        assert_eq!(frame, DragFrame::IDLE);
        assert!(!gesture.is_moving());
    }

    #[test]
    fn test_one_slot_crossing_bumps_once() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        // 65 px of travel: past one 60 px slot, short of two.
        let mut bumps = Vec::new();
        let frame = gesture.on_pointer_move(sample(Point::new(75.0, 10.0), 0.0), |by| {
            bumps.push(by);
            true
        });

        assert_eq!(bumps, vec![1]);
        assert!(frame.moving);
        assert_eq!(frame.translate_x, 65.0);
    }

    #[test]
    fn test_lingering_after_accepted_bump_stays_quiet() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        assert!(gesture
            .on_pointer_move(sample(Point::new(75.0, 10.0), 0.0), |_| true)
            .moving);

        // The tab now sits at index 1; the pointer barely drifts. The
        // crossed-slot count is stale-free and the reference point was
        // rebased, so nothing further is proposed.
        let frame = gesture.on_pointer_move(sample(Point::new(77.0, 10.0), 100.0), |_| {
            panic!("no bump without fresh travel past the radius")
        });

        assert_eq!(frame.translate_x, -33.0);
    }

    #[test]
    fn test_rejected_bump_keeps_reference_point() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        let mut offers = 0;
        gesture.on_pointer_move(sample(Point::new(75.0, 10.0), 0.0), |_| {
            offers += 1;
            false
        });

        // Same travel from the unmoved reference still proposes.
        gesture.on_pointer_move(sample(Point::new(76.0, 10.0), 0.0), |_| {
            offers += 1;
            false
        });

        assert_eq!(offers, 2);
    }

    #[test]
    fn test_offset_clamps_to_strip_edges() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        // Way past the right edge: offset stops at strip width minus tab
        // width.
        let frame = gesture.on_pointer_move(sample(Point::new(500.0, 10.0), 0.0), |_| true);
        assert_eq!(frame.translate_x, 100.0);

        // Way past the left edge on a tab at index 1.
        let mut gesture = DragGesture::begin(CONFIG, Point::new(110.0, 10.0), 100.0);
        let frame = gesture.on_pointer_move(sample(Point::new(-500.0, 10.0), 100.0), |_| true);
        assert_eq!(frame.translate_x, -100.0);
    }

    #[test]
    fn test_unmeasured_geometry_skips_the_sample() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);

        let frame = gesture.on_pointer_move(
            PointerSample {
                pointer: Point::new(75.0, 10.0),
                tab_box: Rect::ZERO,
                strip_box: Rect::new(0.0, 0.0, 200.0, 30.0),
            },
            |_| panic!("no bump on unmeasured geometry"),
        );

        assert_eq!(frame, DragFrame::IDLE);

        // The next measured sample proceeds normally.
        let frame = gesture.on_pointer_move(sample(Point::new(75.0, 10.0), 0.0), |_| true);
        assert!(frame.moving);
    }

    #[test]
    fn test_narrow_tab_has_no_leftward_slot() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(100.0, 10.0), 90.0);

        let frame = gesture.on_pointer_move(
            PointerSample {
                pointer: Point::new(40.0, 10.0),
                tab_box: Rect::new(90.0, 0.0, 20.0, 30.0),
                strip_box: Rect::new(0.0, 0.0, 200.0, 30.0),
            },
            |_| panic!("slot width degenerates on very narrow tabs"),
        );

        assert!(frame.moving);
    }

    #[test]
    fn test_finish_resets_transform_and_state() {
        let mut gesture = DragGesture::begin(CONFIG, Point::new(10.0, 10.0), 0.0);
        gesture.on_pointer_move(sample(Point::new(75.0, 10.0), 0.0), |_| true);
        assert!(gesture.is_moving());

        let frame = gesture.finish();
        assert_eq!(frame, DragFrame::IDLE);
        assert!(!gesture.is_moving());
    }
}
