use crate::config::Config;
use spindle::random::seeded;
use spindle::{Label, SpinEvent, SpinPlan, Tween, TweenSample, Wheel, WheelError};
use std::time::Duration;

pub type SpinSource = fastrand::Rng;

/// Segment the pointer rests on after a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    pub index: usize,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    Running,
    Settled(Landing),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Unchanged,
    Relabeled,
    Rebuilt,
    Deferred,
}

/// Clock for one running spin, anchored at the first frame it sees.
#[derive(Debug)]
struct Timeline {
    tween: Tween,
    started_at: Option<i64>,
}

impl Timeline {
    fn new(plan: &SpinPlan) -> Self {
        Self {
            tween: plan.tween(),
            started_at: None,
        }
    }

    /// `frame_time` is in microseconds, as reported by the frame clock.
    fn sample(&mut self, frame_time: i64) -> TweenSample {
        let start = *self.started_at.get_or_insert(frame_time);
        let elapsed = u64::try_from(frame_time.saturating_sub(start)).unwrap_or(0);
        self.tween.sample(Duration::from_micros(elapsed))
    }
}

/// The wheel as the application drives it: engine, running animation and the config it was
/// built from.
#[derive(Debug)]
pub struct Session {
    wheel: Wheel<SpinSource>,
    config: Config,
    timeline: Option<Timeline>,
    pending: Option<Config>,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, WheelError> {
        Ok(Self {
            wheel: Self::build_wheel(&config)?,
            config,
            timeline: None,
            pending: None,
        })
    }

    fn build_wheel(config: &Config) -> Result<Wheel<SpinSource>, WheelError> {
        Ok(Wheel::new(
            config.labels.clone(),
            config.wheel.radii(),
            seeded(config.spin.seed),
        )?
        .with_easing(config.spin.easing))
    }

    pub fn wheel(&self) -> &Wheel<SpinSource> {
        &self.wheel
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_animating(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn is_stalled(&self) -> bool {
        self.wheel.engine().is_stalled()
    }

    /// Returns `true` when the wheel is armed for a spin afterwards.
    pub fn begin(&mut self) -> bool {
        self.wheel.handle(SpinEvent::GestureBegin);
        let engine = self.wheel.engine();
        engine.is_armed() && !engine.is_spinning()
    }

    /// Returns `true` when a spin started and the caller should start ticking.
    pub fn release(&mut self) -> bool {
        match self.wheel.handle(SpinEvent::GestureRelease) {
            Some(plan) => {
                self.timeline = Some(Timeline::new(&plan));
                true
            }
            None => false,
        }
    }

    pub fn advance(&mut self, frame_time: i64) -> FrameOutcome {
        let Some(timeline) = self.timeline.as_mut() else {
            return FrameOutcome::Idle;
        };

        let sample = timeline.sample(frame_time);
        self.wheel.frame(sample.value);
        if !sample.finished {
            return FrameOutcome::Running;
        }

        self.timeline = None;
        self.wheel.handle(SpinEvent::AnimationCompleted {
            finished_cleanly: true,
        });

        let landing = Landing {
            index: self.wheel.landed_segment(),
            label: self.wheel.landed_label().clone(),
        };
        log::info!(
            "Wheel settled on '{}' (segment {})",
            landing.label,
            landing.index
        );

        // labels may change below; the landing was taken on the wheel that actually spun
        self.apply_pending();
        FrameOutcome::Settled(landing)
    }

    /// Reports the running animation as cut short. Returns `true` if one was running.
    pub fn abort(&mut self) -> bool {
        if self.timeline.take().is_none() {
            return false;
        }
        self.wheel.handle(SpinEvent::AnimationCompleted {
            finished_cleanly: false,
        });
        true
    }

    /// Re-creates a stalled wheel from the current config.
    pub fn recover(&mut self) -> Result<bool, WheelError> {
        if !self.is_stalled() {
            return Ok(false);
        }

        let config = self.pending.take().unwrap_or_else(|| self.config.clone());
        self.wheel = Self::build_wheel(&config)?;
        self.config = config;
        log::info!("Stalled wheel re-created");
        Ok(true)
    }

    pub fn reload(&mut self, config: Config) -> Result<ReloadOutcome, WheelError> {
        if self.is_stalled() {
            self.pending = Some(config);
            self.recover()?;
            return Ok(ReloadOutcome::Rebuilt);
        }
        if self.wheel.engine().is_spinning() {
            self.pending = Some(config);
            return Ok(ReloadOutcome::Deferred);
        }
        self.apply(config)
    }

    fn apply(&mut self, config: Config) -> Result<ReloadOutcome, WheelError> {
        if config == self.config {
            return Ok(ReloadOutcome::Unchanged);
        }

        let outcome = if config.wheel != self.config.wheel || config.spin != self.config.spin {
            self.wheel = Self::build_wheel(&config)?;
            ReloadOutcome::Rebuilt
        } else {
            self.wheel.set_labels(&config.labels)?;
            ReloadOutcome::Relabeled
        };
        self.config = config;
        Ok(outcome)
    }

    fn apply_pending(&mut self) {
        if let Some(config) = self.pending.take() {
            match self.apply(config) {
                Ok(outcome) => log::info!("Applied deferred config reload ({:?})", outcome),
                Err(e) => log::error!("Deferred config reload failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle::SpinStatus;
    use spindle::label::labels;

    const SECOND: i64 = 1_000_000;

    fn session() -> Session {
        let mut config = Config::default();
        config.spin.seed = Some(1234);
        Session::new(config).unwrap()
    }

    fn spin_to_end(session: &mut Session) -> FrameOutcome {
        assert!(session.begin());
        assert!(session.release());
        let start = 10 * SECOND;
        assert_eq!(session.advance(start), FrameOutcome::Running);
        assert_eq!(session.advance(start + 3 * SECOND), FrameOutcome::Running);
        session.advance(start + 6 * SECOND)
    }

    #[test]
    fn test_full_spin_settles_on_mirrored_segment() {
        let mut session = session();
        assert!(session.begin());
        assert!(session.release());

        let plan = *session.wheel().engine().plan().unwrap();
        assert_eq!(session.advance(0), FrameOutcome::Running);
        assert_eq!(session.wheel().engine().rotation(), 0.0);
        assert_eq!(session.advance(SECOND), FrameOutcome::Running);
        assert!(session.wheel().engine().rotation() > 0.0);

        let expected = (8 - plan.target_index) % 8;
        let FrameOutcome::Settled(landing) = session.advance(6 * SECOND) else {
            panic!("spin did not settle");
        };
        assert_eq!(landing.index, expected);
        assert_eq!(landing.label, session.config().labels[expected]);
        assert_eq!(session.wheel().engine().rotation(), plan.to);
        assert_eq!(session.wheel().engine().status(), SpinStatus::Idle);
        assert!(!session.is_animating());
        assert_eq!(session.advance(7 * SECOND), FrameOutcome::Idle);

        assert!(session.begin());
    }

    #[test]
    fn test_release_without_begin_does_not_animate() {
        let mut session = session();
        assert!(!session.release());
        assert!(!session.is_animating());
        assert_eq!(session.advance(0), FrameOutcome::Idle);
    }

    #[test]
    fn test_abort_stalls_until_recovered() {
        let mut session = session();
        session.begin();
        session.release();
        session.advance(0);

        assert!(session.abort());
        assert!(!session.abort());
        assert!(session.is_stalled());
        assert!(!session.begin());

        assert!(session.recover().unwrap());
        assert!(!session.is_stalled());
        assert_eq!(session.wheel().engine().rotation(), 0.0);
        assert!(session.begin());
    }

    #[test]
    fn test_reload_during_spin_is_deferred() {
        let mut session = session();
        session.begin();
        session.release();
        session.advance(0);

        let mut next = session.config().clone();
        next.labels = labels(["heads", "tails"]);
        assert_eq!(session.reload(next.clone()).unwrap(), ReloadOutcome::Deferred);
        assert_eq!(session.wheel().state().segment_count(), 8);

        let FrameOutcome::Settled(landing) = session.advance(6 * SECOND) else {
            panic!("spin did not settle");
        };
        assert!(landing.index < 8);
        assert_eq!(session.wheel().state().segment_count(), 2);
        assert_eq!(session.config(), &next);
    }

    #[test]
    fn test_reload_when_idle() {
        let mut session = session();
        assert_eq!(
            session.reload(session.config().clone()).unwrap(),
            ReloadOutcome::Unchanged
        );

        let mut relabeled = session.config().clone();
        relabeled.labels = labels(["a", "b", "c"]);
        assert_eq!(
            session.reload(relabeled).unwrap(),
            ReloadOutcome::Relabeled
        );
        assert_eq!(session.wheel().state().segment_count(), 3);

        let mut resized = session.config().clone();
        resized.wheel.diameter = 600.0;
        assert_eq!(session.reload(resized).unwrap(), ReloadOutcome::Rebuilt);
        assert_eq!(session.wheel().state().outer_radius(), 300.0);
    }

    #[test]
    fn test_reload_recreates_stalled_wheel() {
        let mut session = session();
        session.begin();
        session.release();
        session.abort();

        let mut next = session.config().clone();
        next.labels = labels(["only"]);
        assert_eq!(session.reload(next).unwrap(), ReloadOutcome::Rebuilt);
        assert!(!session.is_stalled());
        assert_eq!(session.wheel().state().segment_count(), 1);
    }

    #[test]
    fn test_seeded_sessions_repeat_outcomes() {
        let mut a = session();
        let mut b = session();
        for _ in 0..5 {
            assert_eq!(spin_to_end(&mut a), spin_to_end(&mut b));
        }
    }
}
