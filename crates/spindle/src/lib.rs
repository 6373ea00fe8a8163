//! Geometry and spin state machine for a wheel-of-fortune dial.

pub mod anim;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod label;
pub mod macros;
pub mod random;
pub mod state;
pub mod wheel;

pub use anim::{Easing, Tween, TweenSample};
pub use cursor::{derive_wobble, indicator_tilt};
pub use engine::{SpinEngine, SpinEvent, SpinPlan, SpinStatus};
pub use error::WheelError;
pub use geometry::{Point, Radii, Segment, WedgeOutline, compute_segments};
pub use label::Label;
pub use random::IndexSource;
pub use state::{WheelMemo, WheelState};
pub use wheel::{Wheel, WheelView};
