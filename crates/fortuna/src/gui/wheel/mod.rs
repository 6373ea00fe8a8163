pub mod model;
pub mod view;

pub use model::{FrameOutcome, Landing, ReloadOutcome, Session};
pub use view::draw;

pub const RIM_WIDTH: f64 = 14.0;
pub const RIM_PADDING: f64 = 5.0;
pub const VIEW_MARGIN: f64 = 24.0; // screen px kept free around the rim
pub const LABEL_FONT_FACTOR: f64 = 0.3; // relative to the outer radius
pub const LABEL_LIFT: f64 = 5.0;

// Pointer, in screen px
pub const POINTER_RADIUS: f64 = 14.0;
pub const POINTER_LENGTH: f64 = 40.0;
pub const POINTER_HOLE_FACTOR: f64 = 0.3;
