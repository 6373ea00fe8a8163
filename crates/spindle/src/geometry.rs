use crate::error::WheelError;
use crate::label::Label;
use std::f64::consts::{PI, TAU};

/// Radius of the hole left at the hub of the wheel.
pub const DEFAULT_INNER_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radii {
    pub inner: f64,
    pub outer: f64,
}

impl Radii {
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    pub fn from_diameter(diameter: f64) -> Self {
        Self::new(DEFAULT_INNER_RADIUS, diameter / 2.0)
    }
}

/// Annular wedge between two radii.
///
/// Angles are in radians, measured clockwise from 12 o'clock, in a y-down coordinate space
/// centered on the hub.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeOutline {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl WedgeOutline {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn span_degrees(&self) -> f64 {
        self.span().to_degrees()
    }

    /// Mid-angle, mid-radius point of the wedge. Used as the label anchor.
    pub fn centroid(&self) -> Point {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let a = (self.start_angle + self.end_angle) / 2.0 - PI / 2.0;
        Point::new(a.cos() * r, a.sin() * r)
    }

    /// Start and end angles in the screen convention (0 at 3 o'clock, clockwise), as
    /// expected by arc primitives such as cairo's.
    pub fn screen_angles(&self) -> (f64, f64) {
        (self.start_angle - PI / 2.0, self.end_angle - PI / 2.0)
    }

    fn point_at(radius: f64, angle: f64) -> Point {
        let a = angle - PI / 2.0;
        Point::new(radius * a.cos(), radius * a.sin())
    }

    /// SVG `d` attribute for this wedge, d3-arc style (`M … A … L … A … Z`), for consumers
    /// that render to SVG instead of drawing through [`WedgeOutline::screen_angles`].
    pub fn to_svg_path(&self) -> String {
        let (r0, r1) = (self.inner_radius, self.outer_radius);

        // a single wedge covering the whole circle is an annulus: two half arcs per ring
        if self.span() >= TAU - 1e-9 {
            let mut path = format!(
                "M0,{}A{},{},0,1,1,0,{}A{},{},0,1,1,0,{}",
                svg_num(-r1),
                svg_num(r1),
                svg_num(r1),
                svg_num(r1),
                svg_num(r1),
                svg_num(r1),
                svg_num(-r1)
            );
            if r0 > 0.0 {
                path.push_str(&format!(
                    "M0,{}A{},{},0,1,0,0,{}A{},{},0,1,0,0,{}",
                    svg_num(-r0),
                    svg_num(r0),
                    svg_num(r0),
                    svg_num(r0),
                    svg_num(r0),
                    svg_num(r0),
                    svg_num(-r0)
                ));
            }
            path.push('Z');
            return path;
        }

        let large_arc = u8::from(self.span() > PI);
        let outer_start = Self::point_at(r1, self.start_angle);
        let outer_end = Self::point_at(r1, self.end_angle);
        let inner_end = Self::point_at(r0, self.end_angle);
        let inner_start = Self::point_at(r0, self.start_angle);

        let mut path = format!(
            "M{},{}A{},{},0,{},1,{},{}",
            svg_num(outer_start.x),
            svg_num(outer_start.y),
            svg_num(r1),
            svg_num(r1),
            large_arc,
            svg_num(outer_end.x),
            svg_num(outer_end.y)
        );
        if r0 > 0.0 {
            path.push_str(&format!(
                "L{},{}A{},{},0,{},0,{},{}",
                svg_num(inner_end.x),
                svg_num(inner_end.y),
                svg_num(r0),
                svg_num(r0),
                large_arc,
                svg_num(inner_start.x),
                svg_num(inner_start.y)
            ));
        } else {
            path.push_str("L0,0");
        }
        path.push('Z');
        path
    }
}

fn svg_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    rounded.to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub outline: WedgeOutline,
    pub label: Label,
    pub anchor: Point,
}

/// Lays the labels out as an equal-weight pie, one wedge per label, in input order.
pub fn compute_segments(labels: &[Label], radii: Radii) -> Result<Vec<Segment>, WheelError> {
    if labels.is_empty() {
        return Err(WheelError::EmptySegments);
    }

    let count = labels.len();
    let step = TAU / count as f64;

    Ok(labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let end_angle = if i + 1 == count {
                TAU
            } else {
                (i + 1) as f64 * step
            };
            let outline = WedgeOutline {
                start_angle: i as f64 * step,
                end_angle,
                inner_radius: radii.inner,
                outer_radius: radii.outer,
            };
            Segment {
                outline,
                label: label.clone(),
                anchor: outline.centroid(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::labels;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_segments_preserve_order_and_cover_circle() {
        for n in 1..=24 {
            let input = labels((0..n).map(|i| format!("L{i}")));
            let segments = compute_segments(&input, Radii::from_diameter(400.0)).unwrap();

            assert_eq!(segments.len(), n);
            for (segment, label) in segments.iter().zip(&input) {
                assert_eq!(&segment.label, label);
            }

            let total: f64 = segments.iter().map(|s| s.outline.span_degrees()).sum();
            assert!((total - 360.0).abs() < EPS, "n = {n}, total = {total}");

            // wedges are contiguous
            for pair in segments.windows(2) {
                assert_eq!(pair[0].outline.end_angle, pair[1].outline.start_angle);
            }
        }
    }

    #[test]
    fn test_empty_labels_rejected() {
        assert_eq!(
            compute_segments(&[], Radii::from_diameter(400.0)),
            Err(WheelError::EmptySegments)
        );
    }

    #[test]
    fn test_segments_are_deterministic() {
        let input = labels(["a", "b", "c"]);
        let radii = Radii::from_diameter(300.0);
        assert_eq!(
            compute_segments(&input, radii).unwrap(),
            compute_segments(&input, radii).unwrap()
        );
    }

    #[test]
    fn test_centroid_placement() {
        let radii = Radii::new(10.0, 30.0);
        let segments = compute_segments(&labels(["right", "left"]), radii).unwrap();

        // first half sits on the right of the hub, second on the left
        assert!((segments[0].anchor.x - 20.0).abs() < EPS);
        assert!(segments[0].anchor.y.abs() < EPS);
        assert!((segments[1].anchor.x + 20.0).abs() < EPS);

        let quarters = compute_segments(&labels(["ne", "se", "sw", "nw"]), radii).unwrap();
        assert!(quarters[0].anchor.x > 0.0 && quarters[0].anchor.y < 0.0);
        assert!(quarters[1].anchor.x > 0.0 && quarters[1].anchor.y > 0.0);
        assert!(quarters[2].anchor.x < 0.0 && quarters[2].anchor.y > 0.0);
        assert!(quarters[3].anchor.x < 0.0 && quarters[3].anchor.y < 0.0);
    }

    #[test]
    fn test_single_segment_spans_full_circle() {
        let segments = compute_segments(&labels(["only"]), Radii::new(5.0, 100.0)).unwrap();
        assert_eq!(segments.len(), 1);
        assert!((segments[0].outline.span_degrees() - 360.0).abs() < EPS);

        let path = segments[0].outline.to_svg_path();
        assert_eq!(path.matches('A').count(), 4);
        assert!(path.starts_with("M0,-100A100,100"));
    }

    #[test]
    fn test_svg_path_for_quarter_wedge() {
        let outline = WedgeOutline {
            start_angle: 0.0,
            end_angle: PI / 2.0,
            inner_radius: 5.0,
            outer_radius: 100.0,
        };
        assert_eq!(
            outline.to_svg_path(),
            "M0,-100A100,100,0,0,1,100,0L5,0A5,5,0,0,0,0,-5Z"
        );
    }

    #[test]
    fn test_screen_angles_start_at_twelve_oclock() {
        let outline = WedgeOutline {
            start_angle: 0.0,
            end_angle: PI,
            inner_radius: 0.0,
            outer_radius: 1.0,
        };
        let (a0, a1) = outline.screen_angles();
        assert!((a0 + PI / 2.0).abs() < EPS);
        assert!((a1 - PI / 2.0).abs() < EPS);
    }
}
