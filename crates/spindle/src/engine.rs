use crate::anim::{Easing, Tween};
use crate::error::WheelError;
use crate::random::IndexSource;
use crate::state::FULL_TURN;
use std::time::Duration;
use strum::Display as StrumDisplay;

/// Minimum number of whole revolutions in every spin.
pub const FULL_TURNS: u32 = 6;
pub const MILLIS_PER_TURN: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum SpinStatus {
    #[default]
    Idle,
    Spinning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEvent {
    GestureBegin,
    GestureRelease,
    AnimationCompleted { finished_cleanly: bool },
}

/// Everything the host animation needs to run one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub target_index: usize,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl SpinPlan {
    pub fn tween(&self) -> Tween {
        Tween::new(self.from, self.to, self.duration, self.easing)
    }
}

pub fn target_angle(segment_count: usize, target_index: usize) -> f64 {
    (FULL_TURN / segment_count as f64) * target_index as f64 + f64::from(FULL_TURNS) * FULL_TURN
}

pub fn spin_duration() -> Duration {
    Duration::from_millis(u64::from(FULL_TURNS) * MILLIS_PER_TURN)
}

/// Spin state machine.
///
/// `begin` arms the engine, `release` commits one spin and hands back a [`SpinPlan`], and a
/// clean animation completion returns it to `Idle`. Duplicate or out-of-order events are
/// absorbed as no-ops. An animation that does not finish cleanly leaves the engine stalled
/// in `Spinning`; only re-creating it gets it back.
#[derive(Debug)]
pub struct SpinEngine<R> {
    source: R,
    easing: Easing,
    segment_count: usize,
    rotation: f64,
    status: SpinStatus,
    armed: bool,
    stalled: bool,
    plan: Option<SpinPlan>,
}

impl<R: IndexSource> SpinEngine<R> {
    pub fn new(segment_count: usize, source: R) -> Result<Self, WheelError> {
        if segment_count == 0 {
            return Err(WheelError::EmptySegments);
        }

        Ok(Self {
            source,
            easing: Easing::default(),
            segment_count,
            rotation: 0.0,
            status: SpinStatus::Idle,
            armed: false,
            stalled: false,
            plan: None,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn status(&self) -> SpinStatus {
        self.status
    }

    pub fn is_spinning(&self) -> bool {
        self.status == SpinStatus::Spinning
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        self.plan.as_ref()
    }

    pub fn handle(&mut self, event: SpinEvent) -> Option<SpinPlan> {
        match event {
            SpinEvent::GestureBegin => {
                self.on_gesture_begin();
                None
            }
            SpinEvent::GestureRelease => self.on_gesture_release(),
            SpinEvent::AnimationCompleted { finished_cleanly } => {
                self.on_animation_complete(finished_cleanly);
                None
            }
        }
    }

    /// Returns `true` when the engine was armed by this call.
    pub fn on_gesture_begin(&mut self) -> bool {
        if self.is_spinning() || self.armed {
            log::trace!("Ignoring gesture begin ({}, armed: {})", self.status, self.armed);
            return false;
        }

        self.armed = true;
        self.rotation = 0.0;
        log::debug!("Spin armed");
        true
    }

    pub fn on_gesture_release(&mut self) -> Option<SpinPlan> {
        if self.is_spinning() || !self.armed {
            log::trace!("Ignoring gesture release ({}, armed: {})", self.status, self.armed);
            return None;
        }

        // out-of-range draws wrap so a sloppy source cannot pick a missing segment
        let target_index = self.source.draw(self.segment_count) % self.segment_count;
        let plan = SpinPlan {
            target_index,
            from: self.rotation,
            to: target_angle(self.segment_count, target_index),
            duration: spin_duration(),
            easing: self.easing,
        };

        self.status = SpinStatus::Spinning;
        self.plan = Some(plan);
        log::debug!(
            "Spinning to segment {} ({:.1} deg over {:?})",
            target_index,
            plan.to,
            plan.duration
        );
        Some(plan)
    }

    /// Writes the live rotation from the running animation. Values are clamped to the plan's
    /// range and never move backwards.
    pub fn on_animation_frame(&mut self, value: f64) -> bool {
        let Some(plan) = self.plan.filter(|_| self.is_spinning()) else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }

        let next = value.clamp(plan.from, plan.to).max(self.rotation);
        let changed = next != self.rotation;
        self.rotation = next;
        changed
    }

    /// Returns `true` when the engine went back to `Idle`.
    pub fn on_animation_complete(&mut self, finished_cleanly: bool) -> bool {
        if !self.is_spinning() {
            log::trace!("Ignoring animation completion while idle");
            return false;
        }

        if !finished_cleanly {
            self.stalled = true;
            log::warn!("Spin animation was interrupted; wheel stays stalled until re-created");
            return false;
        }

        if let Some(plan) = self.plan.take() {
            self.rotation = plan.to;
        }
        self.status = SpinStatus::Idle;
        self.armed = false;
        self.stalled = false;
        log::debug!("Spin settled at {:.1} deg", self.rotation);
        true
    }

    /// Changes the number of segments. Ignored while spinning, so the running plan stays
    /// consistent with the geometry it was drawn for.
    pub fn resize(&mut self, segment_count: usize) -> Result<bool, WheelError> {
        if segment_count == 0 {
            return Err(WheelError::EmptySegments);
        }
        if self.is_spinning() {
            log::warn!(
                "Ignoring segment count change {} -> {} during a spin",
                self.segment_count,
                segment_count
            );
            return Ok(false);
        }

        self.segment_count = segment_count;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedIndex, ScriptedIndex, seeded};

    fn engine(n: usize, index: usize) -> SpinEngine<FixedIndex> {
        SpinEngine::new(n, FixedIndex(index)).unwrap()
    }

    #[test]
    fn test_zero_segments_rejected() {
        assert_eq!(
            SpinEngine::new(0, FixedIndex(0)).err(),
            Some(WheelError::EmptySegments)
        );
    }

    #[test]
    fn test_target_angle_and_duration_for_every_index() {
        for n in 1..=32 {
            for k in 0..n {
                let mut e = engine(n, k);
                assert!(e.on_gesture_begin());
                let plan = e.on_gesture_release().unwrap();

                assert_eq!(plan.target_index, k);
                assert_eq!(plan.to, (360.0 / n as f64) * k as f64 + 6.0 * 360.0);
                assert_eq!(plan.duration, Duration::from_millis(6000));
                assert_eq!(plan.from, 0.0);
            }
        }
    }

    #[test]
    fn test_release_without_begin_is_noop() {
        let mut e = engine(8, 3);
        assert_eq!(e.on_gesture_release(), None);
        assert_eq!(e.status(), SpinStatus::Idle);
        assert_eq!(e.rotation(), 0.0);
        assert!(!e.is_armed());
    }

    #[test]
    fn test_double_begin_behaves_as_one() {
        let mut e = engine(8, 3);
        assert!(e.on_gesture_begin());
        assert!(!e.on_gesture_begin());
        assert!(e.is_armed());
        assert!(e.on_gesture_release().is_some());
    }

    #[test]
    fn test_release_while_spinning_is_noop() {
        let mut e = SpinEngine::new(8, ScriptedIndex::new([3, 6])).unwrap();
        e.on_gesture_begin();
        let plan = e.on_gesture_release().unwrap();

        assert_eq!(e.on_gesture_release(), None);
        assert!(!e.on_gesture_begin());
        assert_eq!(e.plan(), Some(&plan));
        assert_eq!(e.status(), SpinStatus::Spinning);
    }

    #[test]
    fn test_end_to_end_spin_cycle() {
        let mut e = SpinEngine::new(8, ScriptedIndex::new([3, 6])).unwrap();

        assert_eq!(e.handle(SpinEvent::GestureBegin), None);
        let plan = e.handle(SpinEvent::GestureRelease).unwrap();
        assert_eq!(plan.to, 2295.0);
        assert_eq!(plan.duration, Duration::from_millis(6000));

        let tween = plan.tween();
        for ms in (0..=6000).step_by(500) {
            e.on_animation_frame(tween.sample(Duration::from_millis(ms)).value);
        }
        assert_eq!(e.rotation(), 2295.0);

        e.handle(SpinEvent::AnimationCompleted {
            finished_cleanly: true,
        });
        assert_eq!(e.status(), SpinStatus::Idle);
        assert!(!e.is_armed());

        // re-armed: the next cycle starts from zero with a fresh draw
        assert!(e.on_gesture_begin());
        assert_eq!(e.rotation(), 0.0);
        let next = e.on_gesture_release().unwrap();
        assert_eq!(next.target_index, 6);
        assert_eq!(next.to, 45.0 * 6.0 + 2160.0);
    }

    #[test]
    fn test_single_segment_always_lands_on_full_turns() {
        let mut e = SpinEngine::new(1, seeded(Some(7))).unwrap();
        for _ in 0..10 {
            e.on_gesture_begin();
            let plan = e.on_gesture_release().unwrap();
            assert_eq!(plan.target_index, 0);
            assert_eq!(plan.to, 2160.0);
            assert!(e.on_animation_complete(true));
        }
    }

    #[test]
    fn test_interrupted_animation_does_not_rearm() {
        let mut e = engine(8, 1);
        e.on_gesture_begin();
        e.on_gesture_release();

        assert!(!e.on_animation_complete(false));
        assert!(e.is_stalled());
        assert_eq!(e.status(), SpinStatus::Spinning);
        assert!(!e.on_gesture_begin());
        assert_eq!(e.on_gesture_release(), None);
    }

    #[test]
    fn test_completion_while_idle_is_noop() {
        let mut e = engine(4, 2);
        assert!(!e.on_animation_complete(true));
        assert_eq!(e.status(), SpinStatus::Idle);
    }

    #[test]
    fn test_frames_are_monotonic_and_bounded() {
        let mut e = engine(4, 2);
        assert!(!e.on_animation_frame(10.0));

        e.on_gesture_begin();
        let plan = e.on_gesture_release().unwrap();

        assert!(e.on_animation_frame(100.0));
        assert!(!e.on_animation_frame(50.0));
        assert_eq!(e.rotation(), 100.0);
        assert!(e.on_animation_frame(plan.to + 1000.0));
        assert_eq!(e.rotation(), plan.to);
        assert!(!e.on_animation_frame(f64::NAN));
    }

    #[test]
    fn test_resize_ignored_while_spinning() {
        let mut e = engine(4, 2);
        assert_eq!(e.resize(0), Err(WheelError::EmptySegments));
        assert_eq!(e.resize(6), Ok(true));
        assert_eq!(e.segment_count(), 6);

        e.on_gesture_begin();
        e.on_gesture_release();
        assert_eq!(e.resize(3), Ok(false));
        assert_eq!(e.segment_count(), 6);
    }
}
