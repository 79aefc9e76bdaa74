use serde::{Deserialize, Serialize};

use super::path::round2;
use crate::domain::MetroMarker;
use crate::geometry::ProjectionTransform;

/// Radius curve for metro dots
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Radius of the rank-1 dot
    pub base_radius: f64,
    /// Radius lost per rank step
    pub rank_step: f64,
    pub min_radius: f64,
    /// Extra radius of the translucent halo drawn under each dot
    pub halo_pad: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            base_radius: 8.0,
            rank_step: 1.2,
            min_radius: 4.0,
            halo_pad: 4.0,
        }
    }
}

/// A metro marker placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub halo_radius: f64,
    pub rank: u32,
    pub label: String,
}

/// `max(min_radius, base_radius - (rank - 1) * rank_step)`
pub fn radius_for_rank(rank: u32, style: &MarkerStyle) -> f64 {
    let steps = rank.saturating_sub(1) as f64;
    (style.base_radius - steps * style.rank_step).max(style.min_radius)
}

/// Place markers with the same transform as their region's outline
///
/// Output order follows input order; draw order is left to the renderer.
pub fn layout_markers(
    markers: &[MetroMarker],
    transform: &ProjectionTransform,
    style: &MarkerStyle,
) -> Vec<PlacedMarker> {
    markers
        .iter()
        .map(|m| {
            let (x, y) = transform.project(m.lng, m.lat);
            let radius = radius_for_rank(m.rank, style);
            PlacedMarker {
                x: round2(x),
                y: round2(y),
                radius,
                halo_radius: radius + style.halo_pad,
                rank: m.rank,
                label: m.name.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, Canvas};

    #[test]
    fn test_default_radius_curve() {
        let style = MarkerStyle::default();
        assert_eq!(radius_for_rank(1, &style), 8.0);
        assert!((radius_for_rank(2, &style) - 6.8).abs() < 1e-9);
        assert!((radius_for_rank(4, &style) - 4.4).abs() < 1e-9);
        assert_eq!(radius_for_rank(5, &style), 4.0);
        assert_eq!(radius_for_rank(40, &style), 4.0);
    }

    #[test]
    fn test_radius_monotonic_and_floored() {
        let style = MarkerStyle::default();
        let mut previous = f64::INFINITY;
        for rank in 1..=100 {
            let r = radius_for_rank(rank, &style);
            assert!(r <= previous);
            assert!(r >= style.min_radius);
            previous = r;
        }
    }

    #[test]
    fn test_markers_share_outline_transform() {
        let bounds = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        };
        let transform = ProjectionTransform::fit(&bounds, &Canvas::default()).unwrap();
        let metros = vec![
            MetroMarker::new("Center", 5.0, 5.0, 1),
            MetroMarker::new("Corner", 10.0, 0.0, 3),
        ];

        let placed = layout_markers(&metros, &transform, &MarkerStyle::default());

        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].x, placed[0].y), (200.0, 150.0));
        assert_eq!(placed[0].radius, 8.0);
        assert_eq!(placed[0].halo_radius, 12.0);
        assert_eq!(placed[0].label, "Center");

        // lat 10, lng 0 is the top-left corner of the outline
        assert_eq!((placed[1].x, placed[1].y), (70.0, 20.0));
        assert_eq!(placed[1].rank, 3);
    }
}
