//! Stroke and fill paths through a point series.

use kurbo::{BezPath, Point};

/// Builds the stroke path through `points` in order.
///
/// Straight mode joins points with line segments. Smooth mode uses one cubic
/// per pair with both control points at the segment's horizontal midpoint,
/// at the previous and current point's height, so the curve passes through
/// every point exactly. Returns `None` for an empty series; a single point
/// yields a path with only its `MoveTo`.
#[must_use]
pub fn build_path(points: &[Point], smooth: bool) -> Option<BezPath> {
    let (first, _) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    append_segments(&mut path, points, smooth);
    Some(path)
}

/// Builds the closed area between the stroke path and `baseline_y`.
///
/// The outline drops from the baseline to the first point, follows the same
/// segments as [`build_path`], then returns to the baseline under the last
/// point.
#[must_use]
pub fn build_fill_path(points: &[Point], baseline_y: f64, smooth: bool) -> Option<BezPath> {
    let (first, _) = points.split_first()?;
    let last = points.last()?;

    let mut path = BezPath::new();
    path.move_to((first.x, baseline_y));
    path.line_to(*first);
    append_segments(&mut path, points, smooth);
    path.line_to((last.x, baseline_y));
    path.close_path();
    Some(path)
}

fn append_segments(path: &mut BezPath, points: &[Point], smooth: bool) {
    for pair in points.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if smooth {
            let mid_x = previous.x + (current.x - previous.x) / 2.0;
            path.curve_to(
                Point::new(mid_x, previous.y),
                Point::new(mid_x, current.y),
                current,
            );
        } else {
            path.line_to(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Point};

    use super::{build_fill_path, build_path};

    #[test]
    fn empty_series_has_no_path() {
        assert!(build_path(&[], true).is_none());
        assert!(build_fill_path(&[], 100.0, false).is_none());
    }

    #[test]
    fn single_point_has_no_segments() {
        let path = build_path(&[Point::new(3.0, 4.0)], false).expect("path");
        assert_eq!(path.elements(), &[PathEl::MoveTo(Point::new(3.0, 4.0))]);
    }

    #[test]
    fn smooth_controls_sit_at_midpoint() {
        let points = [Point::new(0.0, 10.0), Point::new(20.0, 30.0)];
        let path = build_path(&points, true).expect("path");
        assert_eq!(
            path.elements()[1],
            PathEl::CurveTo(
                Point::new(10.0, 10.0),
                Point::new(10.0, 30.0),
                Point::new(20.0, 30.0)
            )
        );
    }
}
