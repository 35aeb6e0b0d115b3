use crate::coords::{Rect, Vec2};

/// Flattened path in device space.
///
/// Points are transformed when they are appended, so later transform changes
/// do not move what is already recorded.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<[f32; 4]>,
    start: Option<Vec2>,
    current: Option<Vec2>,
    points: usize,
}

impl Path {
    pub fn clear(&mut self) {
        self.segments.clear();
        self.start = None;
        self.current = None;
        self.points = 0;
    }

    /// Segments as `[x1, y1, x2, y2]`.
    #[inline]
    pub fn segments(&self) -> &[[f32; 4]] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Points appended since the last clear (move targets included).
    pub fn point_count(&self) -> usize {
        self.points
    }

    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    pub fn first_point(&self) -> Option<Vec2> {
        self.segments.first().map(|s| Vec2::new(s[0], s[1]))
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.segments.last().map(|s| Vec2::new(s[2], s[3]))
    }

    /// Bounds of every segment endpoint.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(
            self.segments
                .iter()
                .flat_map(|s| [Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3])]),
        )
    }

    /// Mean of the distinct path points, the fan center for fills.
    ///
    /// Every segment contributes its start point. A chain of connected
    /// segments also contributes its final end point unless it closes back
    /// on its own start.
    pub fn centroid(&self) -> Option<Vec2> {
        let mut sum = Vec2::zero();
        let mut count = 0usize;
        let mut chain_start: Option<Vec2> = None;

        for (i, s) in self.segments.iter().enumerate() {
            let (a, b) = (Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3]));
            let first = *chain_start.get_or_insert(a);
            sum = sum + a;
            count += 1;

            let continues = self
                .segments
                .get(i + 1)
                .is_some_and(|next| next[0] == b.x && next[1] == b.y);
            if !continues {
                if b.distance(first) > 1e-4 {
                    sum = sum + b;
                    count += 1;
                }
                chain_start = None;
            }
        }

        (count > 0).then(|| sum / count as f32)
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.start = Some(p);
        self.current = Some(p);
        self.points += 1;
    }

    /// Without a current point this starts a subpath instead.
    pub fn line_to(&mut self, p: Vec2) {
        let Some(from) = self.current else {
            self.move_to(p);
            return;
        };
        self.segments.push([from.x, from.y, p.x, p.y]);
        self.current = Some(p);
        self.points += 1;
    }

    /// Joins to `p` unless the path already ends there.
    pub fn connect_to(&mut self, p: Vec2, eps: f32) {
        match self.current {
            Some(c) if c.distance(p) <= eps => {}
            Some(_) => self.line_to(p),
            None => self.move_to(p),
        }
    }

    /// Closes the subpath back to its start point.
    pub fn close(&mut self) {
        let (Some(start), Some(current)) = (self.start, self.current) else {
            return;
        };
        if current.distance(start) > 1e-4 {
            self.segments.push([current.x, current.y, start.x, start.y]);
            self.points += 1;
        } else if let Some(last) = self.segments.last_mut() {
            last[2] = start.x;
            last[3] = start.y;
        }
        self.current = Some(start);
    }
}

/// Cubic Bézier point at `t` (Bernstein form).
#[inline]
pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    p0 * b0 + c1 * b1 + c2 * b2 + p1 * b3
}

/// Cubic control points equivalent to the quadratic `p0, c, p1`.
#[inline]
pub fn elevate_quadratic(p0: Vec2, c: Vec2, p1: Vec2) -> (Vec2, Vec2) {
    (p0 + (c - p0) * (2.0 / 3.0), p1 + (c - p1) * (2.0 / 3.0))
}

/// Sweep direction of an arc.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArcDirection {
    /// Increasing angle (clockwise on a y-down screen).
    Increasing,
    Decreasing,
}

impl ArcDirection {
    /// `1` is increasing; any other flag is decreasing.
    pub fn from_flag(flag: i32) -> Self {
        if flag == 1 {
            ArcDirection::Increasing
        } else {
            ArcDirection::Decreasing
        }
    }

    /// Signed sweep from `a0` to `a1`, wrapped by one turn to run this way.
    pub fn sweep(self, a0: f32, a1: f32) -> f32 {
        let da = a1 - a0;
        match self {
            ArcDirection::Increasing if da < 0.0 => da + std::f32::consts::TAU,
            ArcDirection::Decreasing if da > 0.0 => da - std::f32::consts::TAU,
            _ => da,
        }
    }
}

/// Segment count for an arc: proportional to its device-space length.
pub fn arc_segments(sweep: f32, device_radius: f32, tessellation: f32) -> usize {
    const MAX_SEGMENTS: f32 = 1024.0;
    let n = (sweep.abs() * device_radius / tessellation.max(1e-3)).min(MAX_SEGMENTS);
    (n as usize).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn line_to_without_current_point_starts_a_subpath() {
        let mut p = Path::default();
        p.line_to(Vec2::new(1.0, 1.0));
        assert!(p.is_empty());
        p.line_to(Vec2::new(2.0, 1.0));
        assert_eq!(p.segments(), &[[1.0, 1.0, 2.0, 1.0]]);
    }

    #[test]
    fn close_returns_to_the_subpath_start() {
        let mut p = Path::default();
        p.move_to(Vec2::new(0.0, 0.0));
        p.line_to(Vec2::new(10.0, 0.0));
        p.line_to(Vec2::new(10.0, 10.0));
        p.close();
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.first_point(), p.last_point());
        assert_eq!(p.current_point(), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn open_path_centroid_counts_the_final_point() {
        let mut p = Path::default();
        p.move_to(Vec2::new(0.0, 0.0));
        p.line_to(Vec2::new(10.0, 0.0));
        p.line_to(Vec2::new(10.0, 10.0));
        let c = p.centroid().unwrap();
        assert!(c.distance(Vec2::new(20.0 / 3.0, 10.0 / 3.0)) < 1e-4, "{c:?}");

        p.close();
        let closed = p.centroid().unwrap();
        assert!(closed.distance(Vec2::new(20.0 / 3.0, 10.0 / 3.0)) < 1e-4, "{closed:?}");
    }

    #[test]
    fn disjoint_subpaths_each_count_their_ends() {
        let mut p = Path::default();
        p.move_to(Vec2::new(0.0, 0.0));
        p.line_to(Vec2::new(4.0, 0.0));
        p.move_to(Vec2::new(0.0, 4.0));
        p.line_to(Vec2::new(4.0, 4.0));
        assert_eq!(p.centroid(), Some(Vec2::new(2.0, 2.0)));
        assert_eq!(Path::default().centroid(), None);
    }

    #[test]
    fn cubic_hits_its_endpoints_and_quadratic_elevation_matches() {
        let (p0, c, p1) = (Vec2::new(0.0, 0.0), Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0));
        let (c1, c2) = elevate_quadratic(p0, c, p1);
        assert_eq!(cubic_point(p0, c1, c2, p1, 0.0), p0);
        assert!(cubic_point(p0, c1, c2, p1, 1.0).distance(p1) < 1e-5);
        // Quadratic midpoint is (p0 + 2c + p1) / 4.
        let mid = cubic_point(p0, c1, c2, p1, 0.5);
        assert!(mid.distance(Vec2::new(5.0, 5.0)) < 1e-5);
    }

    #[test]
    fn sweep_wraps_by_direction() {
        assert!((ArcDirection::Increasing.sweep(PI, 0.0) - PI).abs() < 1e-6);
        assert!((ArcDirection::Decreasing.sweep(0.0, PI) + PI).abs() < 1e-6);
        assert!((ArcDirection::Increasing.sweep(0.0, TAU) - TAU).abs() < 1e-6);
        assert_eq!(ArcDirection::from_flag(1), ArcDirection::Increasing);
        assert_eq!(ArcDirection::from_flag(0), ArcDirection::Decreasing);
        assert_eq!(ArcDirection::from_flag(-1), ArcDirection::Decreasing);
    }

    #[test]
    fn arc_segments_scale_with_device_length() {
        assert_eq!(arc_segments(0.1, 1.0, 4.0), 3);
        assert_eq!(arc_segments(TAU, 100.0, 4.0), 157);
        let counts: Vec<usize> = [5.0, 10.0, 20.0, 40.0, 80.0]
            .iter()
            .map(|&r| arc_segments(TAU, r, 4.0))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] < w[1]), "{counts:?}");
    }
}
