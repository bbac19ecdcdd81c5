//! Chart point reduction.

/// Reduces `points` to at most `max_points` entries for display.
///
/// The first and last points are always kept. Interior slots are filled by
/// striding evenly through the interior indices; points are selected verbatim,
/// never interpolated. A `max_points` below 2 is treated as 2.
pub fn downsample<T: Clone>(points: &[T], max_points: usize) -> Vec<T> {
    let max_points = max_points.max(2);
    let len = points.len();
    if len <= max_points {
        return points.to_vec();
    }

    let interior_slots = max_points - 2;
    let stride = (len - 2) as f64 / interior_slots as f64;

    let mut sampled = Vec::with_capacity(max_points);
    sampled.push(points[0].clone());
    for slot in 1..=interior_slots {
        let index = (1.0 + (slot - 1) as f64 * stride).round() as usize;
        sampled.push(points[index].clone());
    }
    sampled.push(points[len - 1].clone());

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_unchanged() {
        let points: Vec<u32> = (0..18).collect();
        assert_eq!(downsample(&points, 18), points);
        assert!(downsample::<u32>(&[], 18).is_empty());
    }

    #[test]
    fn test_keeps_endpoints_and_bounds_length() {
        let points: Vec<u32> = (0..100).collect();
        let sampled = downsample(&points, 18);
        assert_eq!(sampled.len(), 18);
        assert_eq!(sampled.first(), Some(&0));
        assert_eq!(sampled.last(), Some(&99));
    }

    #[test]
    fn test_interior_indices_follow_stride() {
        // stride = (20 - 2) / (5 - 2) = 6 -> interior picks 1, 7, 13
        let points: Vec<u32> = (0..20).collect();
        assert_eq!(downsample(&points, 5), vec![0, 1, 7, 13, 19]);
    }

    #[test]
    fn test_rounds_fractional_positions() {
        // stride = (10 - 2) / (4 - 2) = 4 -> picks 1, 5
        let points: Vec<u32> = (0..10).collect();
        assert_eq!(downsample(&points, 4), vec![0, 1, 5, 9]);

        // stride = (9 - 2) / (4 - 2) = 3.5 -> picks 1, round(4.5) = 5
        let points: Vec<u32> = (0..9).collect();
        assert_eq!(downsample(&points, 4), vec![0, 1, 5, 8]);
    }

    #[test]
    fn test_strictly_increasing_indices() {
        let points: Vec<usize> = (0..1000).collect();
        let sampled = downsample(&points, 18);
        assert!(sampled.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tiny_caps_keep_endpoints() {
        let points: Vec<u32> = (0..10).collect();
        assert_eq!(downsample(&points, 2), vec![0, 9]);
        assert_eq!(downsample(&points, 0), vec![0, 9]);
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<u32> = (0..257).collect();
        assert_eq!(downsample(&points, 18), downsample(&points, 18));
    }
}
