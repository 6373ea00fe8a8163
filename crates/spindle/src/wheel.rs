use crate::anim::Easing;
use crate::cursor::derive_wobble;
use crate::engine::{SpinEngine, SpinEvent, SpinPlan, SpinStatus};
use crate::error::WheelError;
use crate::geometry::Radii;
use crate::label::Label;
use crate::random::IndexSource;
use crate::state::{FULL_TURN, WheelMemo, WheelState};
use std::rc::Rc;

/// One wheel instance: its layout plus the spin engine driving it.
///
/// Everything outside reads through [`Wheel::view`]; only the engine's transition methods
/// mutate the spin.
#[derive(Debug)]
pub struct Wheel<R> {
    memo: WheelMemo,
    engine: SpinEngine<R>,
}

/// Per-frame snapshot handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct WheelView<'a> {
    pub state: &'a WheelState,
    pub rotation: f64,
    pub wobble: f64,
    pub status: SpinStatus,
}

impl<R: IndexSource> Wheel<R> {
    pub fn new(labels: Vec<Label>, radii: Radii, source: R) -> Result<Self, WheelError> {
        let memo = WheelMemo::new(labels, radii)?;
        let engine = SpinEngine::new(memo.state().segment_count(), source)?;
        Ok(Self { memo, engine })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.engine = self.engine.with_easing(easing);
        self
    }

    pub fn state(&self) -> &WheelState {
        self.memo.state()
    }

    pub fn shared_state(&self) -> Rc<WheelState> {
        self.memo.shared()
    }

    pub fn labels(&self) -> &[Label] {
        self.memo.labels()
    }

    pub fn radii(&self) -> Radii {
        self.memo.radii()
    }

    pub fn engine(&self) -> &SpinEngine<R> {
        &self.engine
    }

    pub fn begin(&mut self) -> bool {
        self.engine.on_gesture_begin()
    }

    pub fn release(&mut self) -> Option<SpinPlan> {
        self.engine.on_gesture_release()
    }

    pub fn frame(&mut self, rotation: f64) -> bool {
        self.engine.on_animation_frame(rotation)
    }

    pub fn complete(&mut self, finished_cleanly: bool) -> bool {
        self.engine.on_animation_complete(finished_cleanly)
    }

    pub fn handle(&mut self, event: SpinEvent) -> Option<SpinPlan> {
        self.engine.handle(event)
    }

    pub fn wobble(&self) -> f64 {
        derive_wobble(self.engine.rotation(), self.engine.is_spinning())
    }

    /// Index of the segment under the pointer at the current rotation.
    pub fn landed_segment(&self) -> usize {
        let state = self.state();
        let under_pointer = (state.angle_offset() - self.engine.rotation()).rem_euclid(FULL_TURN);
        (under_pointer / state.angle_by_segment()).floor() as usize % state.segment_count()
    }

    pub fn landed_label(&self) -> &Label {
        &self.state().segments()[self.landed_segment()].label
    }

    /// Swaps in a new label list. Ignored while spinning; returns `Ok(true)` when the layout
    /// was rebuilt.
    pub fn set_labels(&mut self, labels: &[Label]) -> Result<bool, WheelError> {
        if labels.is_empty() {
            return Err(WheelError::EmptySegments);
        }
        if self.engine.is_spinning() {
            log::warn!("Ignoring label change while the wheel is spinning");
            return Ok(false);
        }

        let rebuilt = self.memo.update(labels)?;
        if rebuilt {
            self.engine.resize(labels.len())?;
        }
        Ok(rebuilt)
    }

    pub fn view(&self) -> WheelView<'_> {
        WheelView {
            state: self.state(),
            rotation: self.engine.rotation(),
            wobble: self.wobble(),
            status: self.engine.status(),
        }
    }
}
