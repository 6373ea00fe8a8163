use crate::error::WheelError;
use crate::geometry::{Radii, Segment, compute_segments};
use crate::label::Label;
use std::rc::Rc;

pub const FULL_TURN: f64 = 360.0;

/// Read-only snapshot of the wheel layout.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelState {
    segments: Vec<Segment>,
    angle_offset: f64,
    angle_by_segment: f64,
}

impl WheelState {
    pub fn build(labels: &[Label], radii: Radii) -> Result<Self, WheelError> {
        let segments = compute_segments(labels, radii)?;
        let angle_by_segment = FULL_TURN / segments.len() as f64;

        Ok(Self {
            segments,
            angle_offset: angle_by_segment / 2.0,
            angle_by_segment,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Degrees the whole wheel is turned back so a boundary, not a center, sits at 12 o'clock.
    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    pub fn angle_by_segment(&self) -> f64 {
        self.angle_by_segment
    }

    pub fn outer_radius(&self) -> f64 {
        self.segments[0].outline.outer_radius
    }
}

/// Keeps the last built [`WheelState`] and only rebuilds it when the labels change.
#[derive(Debug)]
pub struct WheelMemo {
    labels: Vec<Label>,
    radii: Radii,
    state: Rc<WheelState>,
}

impl WheelMemo {
    pub fn new(labels: Vec<Label>, radii: Radii) -> Result<Self, WheelError> {
        let state = Rc::new(WheelState::build(&labels, radii)?);
        Ok(Self {
            labels,
            radii,
            state,
        })
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn shared(&self) -> Rc<WheelState> {
        Rc::clone(&self.state)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn radii(&self) -> Radii {
        self.radii
    }

    /// Returns `Ok(true)` when the state was rebuilt.
    pub fn update(&mut self, labels: &[Label]) -> Result<bool, WheelError> {
        if self.labels == labels {
            return Ok(false);
        }

        self.state = Rc::new(WheelState::build(labels, self.radii)?);
        self.labels = labels.to_vec();
        log::debug!("Rebuilt wheel state with {} segments", labels.len());
        Ok(true)
    }
}
