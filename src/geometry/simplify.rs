use geo::Coord;

/// Fixed-stride decimation of a closed ring
///
/// Keeps every `stride`-th point starting from the first, where
/// `stride = ceil(len / budget)`, then appends the ring's true last point
/// if sampling did not land on its index. The result is closed whenever the
/// input is, holds at least 2 points for any ring of 2 or more, and never
/// more than `budget + 1`.
///
/// The stride rounds up, unlike the `floor(len / budget)` used by the older
/// boundary generator; rounding down keeps every point of rings between
/// `budget` and `2 * budget` long. For rings whose length is not a multiple
/// of the budget (a 1234-point ring at budget 50 samples every 25th point
/// here, every 24th there) the kept vertices differ from that output.
///
/// This is not shape-aware: straight runs and tight curves lose points at
/// the same rate, and the output may self-intersect.
pub fn decimate_ring(ring: &[Coord<f64>], budget: usize) -> Vec<Coord<f64>> {
    let Some(&last) = ring.last() else {
        return Vec::new();
    };

    let last_index = ring.len() - 1;
    let stride = ring.len().div_ceil(budget.max(1)).max(1);
    let mut sampled: Vec<Coord<f64>> = ring.iter().step_by(stride).copied().collect();

    if last_index % stride != 0 {
        sampled.push(last);
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn closed_ring(n: usize) -> Vec<Coord<f64>> {
        let mut ring: Vec<Coord<f64>> = (0..n - 1)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
                coord! { x: t.cos(), y: t.sin() }
            })
            .collect();
        ring.push(ring[0]);
        ring
    }

    #[test]
    fn test_thousand_points_to_fifty() {
        let ring = closed_ring(1000);
        let result = decimate_ring(&ring, 50);

        // stride 20 samples indices 0, 20, ..., 980, then the closing point
        assert_eq!(result.len(), 51);
        assert_eq!(result[1], ring[20]);
        assert_eq!(result.first(), result.last());
    }

    #[test]
    fn test_short_ring_untouched() {
        let ring = closed_ring(10);
        assert_eq!(decimate_ring(&ring, 50), ring);
    }

    #[test]
    fn test_budget_holds_between_one_and_two_times() {
        // 99 points with budget 50 would keep every point at stride 1
        for n in [51, 75, 99, 100, 101, 149, 1001, 5003] {
            let ring = closed_ring(n);
            let result = decimate_ring(&ring, 50);
            assert!(result.len() <= 51, "n={} gave {}", n, result.len());
            assert!(result.len() >= 2);
            assert_eq!(result.first(), result.last(), "n={} not closed", n);
        }
    }

    #[test]
    fn test_stride_landing_on_last_point_adds_nothing() {
        // 99 points, stride 2 lands exactly on index 98
        let ring = closed_ring(99);
        let result = decimate_ring(&ring, 50);
        assert_eq!(result.len(), 50);
        assert_eq!(*result.last().unwrap(), ring[98]);
    }

    #[test]
    fn test_tiny_budget_still_closed() {
        let ring = closed_ring(20);
        let result = decimate_ring(&ring, 1);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], result[1]);

        let zero = decimate_ring(&ring, 0);
        assert_eq!(zero, result);
    }

    #[test]
    fn test_budget_one_and_two_keep_closing_point() {
        for n in [4, 5, 17, 1000] {
            let ring = closed_ring(n);
            for budget in [1, 2] {
                let result = decimate_ring(&ring, budget);
                assert!(
                    (2..=budget + 1).contains(&result.len()),
                    "n={} budget={} gave {}",
                    n,
                    budget,
                    result.len()
                );
                assert_eq!(result.first(), ring.first());
                assert_eq!(result.last(), ring.last());
            }
        }
    }

    #[test]
    fn test_open_line_keeps_true_endpoint() {
        let line: Vec<Coord<f64>> = (0..10).map(|i| coord! { x: i as f64, y: 0.0 }).collect();
        let result = decimate_ring(&line, 3);
        // stride 4 samples 0, 4, 8, then the last point
        assert_eq!(result.len(), 4);
        assert_eq!(result[3], line[9]);
    }

    #[test]
    fn test_empty_ring() {
        assert!(decimate_ring(&[], 50).is_empty());
    }
}
