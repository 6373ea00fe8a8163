use super::{
    LABEL_FONT_FACTOR, LABEL_LIFT, POINTER_HOLE_FACTOR, POINTER_LENGTH, POINTER_RADIUS,
    RIM_PADDING, RIM_WIDTH, VIEW_MARGIN,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use spindle::state::FULL_TURN;
use spindle::{Segment, WheelState, WheelView, indicator_tilt};
use std::f64::consts::PI;

struct SegmentRenderer<'a> {
    segment: &'a Segment,
    index: usize,
    state: &'a WheelState,
}

impl<'a> SegmentRenderer<'a> {
    fn new(segment: &'a Segment, index: usize, state: &'a WheelState) -> Self {
        Self {
            segment,
            index,
            state,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_wedge(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn fill(&self, colors: &ThemeColors) -> Srgba<f64> {
        if self.index % 2 == 0 {
            colors.wedge_even
        } else {
            colors.wedge_odd
        }
    }

    fn draw_wedge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let outline = &self.segment.outline;
        let (start, end) = outline.screen_angles();

        cr.new_path();
        cr.arc(0.0, 0.0, outline.outer_radius, start, end);
        cr.arc_negative(0.0, 0.0, outline.inner_radius, end, start);
        cr.close_path();
        set_source(cr, self.fill(colors));
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.segment.label.as_str();
        let anchor = self.segment.anchor;
        // keep the label upright relative to its own wedge
        let angle = self.index as f64 * FULL_TURN / self.state.segment_count() as f64
            + self.state.angle_offset();

        cr.save()?;
        cr.translate(anchor.x, anchor.y);
        cr.rotate(angle.to_radians());
        set_source(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.state.outer_radius() * LABEL_FONT_FACTOR);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(-(ext.width() / 2.0 + ext.x_bearing()), -LABEL_LIFT);
            cr.show_text(text)?;
        }
        cr.restore()
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    view: &WheelView<'_>,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let state = view.state;
    let outer = state.outer_radius();
    let extent = outer + RIM_PADDING + RIM_WIDTH;
    let available = (width.min(height) / 2.0 - VIEW_MARGIN).max(1.0);
    let scale = available / extent;
    let (cx, cy) = (width / 2.0, height / 2.0);

    cr.save()?;
    cr.translate(cx, cy);
    cr.scale(scale, scale);
    draw_rim(cr, outer, colors)?;

    cr.save()?;
    cr.rotate((view.rotation - state.angle_offset()).to_radians());
    for (i, segment) in state.segments().iter().enumerate() {
        SegmentRenderer::new(segment, i, state).draw(cr, colors)?;
    }
    cr.restore()?;
    cr.restore()?;

    draw_pointer(cr, cx, cy - extent * scale, view.wobble, colors)
}

fn draw_rim(cr: &Context, outer: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.rim);
    cr.set_line_width(RIM_WIDTH);
    cr.new_path();
    cr.arc(0.0, 0.0, outer + RIM_PADDING + RIM_WIDTH / 2.0, 0.0, 2.0 * PI);
    cr.stroke()
}

/// Teardrop pointer hanging over 12 o'clock, swung by the wobble.
fn draw_pointer(
    cr: &Context,
    x: f64,
    y: f64,
    wobble: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(x, y);
    cr.rotate(indicator_tilt(wobble).to_radians());

    cr.new_path();
    cr.arc(0.0, 0.0, POINTER_RADIUS, PI, 2.0 * PI);
    cr.line_to(0.0, POINTER_LENGTH);
    cr.close_path();
    set_source(cr, colors.pointer);
    cr.fill()?;

    cr.new_path();
    cr.arc(0.0, 0.0, POINTER_RADIUS * POINTER_HOLE_FACTOR, 0.0, 2.0 * PI);
    set_source(cr, colors.pointer_hole);
    cr.fill()?;

    cr.restore()
}
