//! Arc-length and cleanup helpers for ordered point sequences.
use super::Point2;

/// Returns `true` if the sequence is closed: more than two points and the
/// first equals the last by exact value.
#[must_use]
pub fn is_closed(points: &[Point2]) -> bool {
    points.len() > 2 && points.first() == points.last()
}

/// Cumulative chord length at each vertex, starting at `0.0`.
#[must_use]
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += (p - points[i - 1]).norm();
        }
        lengths.push(total);
    }
    lengths
}

/// Chord-length parameters normalized to `[0, 1]`.
///
/// A sequence of zero total length yields all zeros.
#[must_use]
pub fn chord_parameters(points: &[Point2]) -> Vec<f64> {
    let mut params = cumulative_lengths(points);
    let total = params.last().copied().unwrap_or(0.0);
    if total > 0.0 {
        for t in &mut params {
            *t /= total;
        }
    }
    params
}

/// Mean length of the segments between consecutive points.
///
/// Returns `1.0` for sequences with no segments.
#[must_use]
pub fn average_segment_length(points: &[Point2]) -> f64 {
    if points.len() < 2 {
        return 1.0;
    }
    let total = cumulative_lengths(points).last().copied().unwrap_or(0.0);
    #[allow(clippy::cast_precision_loss)]
    let segments = (points.len() - 1) as f64;
    total / segments
}

/// Removes consecutive points that are equal by value.
#[must_use]
pub fn dedup_consecutive(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

/// Drops every point whose squared distance to the last *kept* point does
/// not exceed `min_dist_sq`. The first point is always kept.
#[must_use]
pub fn filter_min_spacing(points: &[Point2], min_dist_sq: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(last) if (p - last).norm_squared() <= min_dist_sq => {}
            _ => out.push(p),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn closed_detection_is_exact() {
        assert!(is_closed(&square()));
        let mut near = square();
        near[4] = Point2::new(0.0, 1e-15);
        assert!(!is_closed(&near));
        assert!(!is_closed(&[Point2::origin(), Point2::origin()]));
    }

    #[test]
    fn cumulative_lengths_of_square() {
        let l = cumulative_lengths(&square());
        assert_eq!(l, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        let t = chord_parameters(&square());
        assert!((t[2] - 0.5).abs() < 1e-12);
        assert!((t[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn average_segment_length_of_square() {
        assert!((average_segment_length(&square()) - 2.0).abs() < 1e-12);
        assert!((average_segment_length(&[Point2::origin()]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dedup_removes_only_consecutive_repeats() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let out = dedup_consecutive(&pts);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], Point2::new(0.0, 0.0));
    }

    #[test]
    fn spacing_filter_measures_against_last_kept() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.02, 0.0),
            Point2::new(0.04, 0.0),
            Point2::new(1.0, 0.0),
        ];
        // 0.02 lies within sqrt(1e-3) ≈ 0.0316 of the origin, 0.04 does not.
        let out = filter_min_spacing(&pts, 1e-3);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], Point2::new(0.04, 0.0));
    }
}
