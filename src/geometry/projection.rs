use geo::Coord;
use serde::Deserialize;

use super::Bounds;
use crate::error::RegionError;

/// Fixed-size drawing surface with uniform padding on every side
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            padding: 20.0,
        }
    }
}

impl Canvas {
    pub fn available_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn available_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

/// Affine map from (lng, lat) to canvas pixels
///
/// Uniform scale, vertical flip (north is up), and a translation that
/// centers the scaled bounding box on the canvas. Built once per region
/// from the bounds of its full geometry; the outline and every marker of
/// that region go through the same value, so they always line up.
///
/// Projection happens in two steps:
/// - `project_padded` places the bounding box's lower-left corner at
///   `(padding, height - padding)`
/// - `centering_shift` moves the box so the slack on the unconstrained axis
///   is split evenly
///
/// `project` is their sum, which reduces to
/// `((lng - min_x) * scale + offset_x, height - (lat - min_y) * scale - offset_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionTransform {
    min_x: f64,
    min_y: f64,
    /// Pixels per degree, shared by both axes
    scale: f64,
    canvas_height: f64,
    padding: f64,
    /// Centering offsets, (canvas - scaled) / 2 on each axis
    offset_x: f64,
    offset_y: f64,
}

impl ProjectionTransform {
    /// Fit `bounds` inside `canvas`, preserving aspect ratio
    ///
    /// Fails with `DegenerateGeometry` when the bounds have zero (or
    /// non-finite) extent on either axis, and with `CanvasTooSmall` when
    /// the padding leaves nothing to draw on.
    pub fn fit(bounds: &Bounds, canvas: &Canvas) -> Result<Self, RegionError> {
        let geo_width = bounds.width();
        let geo_height = bounds.height();

        if !(geo_width.is_finite() && geo_height.is_finite()) || geo_width <= 0.0 || geo_height <= 0.0
        {
            return Err(RegionError::DegenerateGeometry(format!(
                "bounding box is {} x {} degrees",
                geo_width, geo_height
            )));
        }

        let available_width = canvas.available_width();
        let available_height = canvas.available_height();
        if available_width <= 0.0 || available_height <= 0.0 {
            return Err(RegionError::CanvasTooSmall {
                width: canvas.width,
                height: canvas.height,
                padding: canvas.padding,
            });
        }

        let scale = (available_width / geo_width).min(available_height / geo_height);

        let scaled_width = geo_width * scale;
        let scaled_height = geo_height * scale;

        Ok(Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            scale,
            canvas_height: canvas.height,
            padding: canvas.padding,
            offset_x: (canvas.width - scaled_width) / 2.0,
            offset_y: (canvas.height - scaled_height) / 2.0,
        })
    }

    /// Project a (lng, lat) point to centered canvas coordinates
    pub fn project(&self, lng: f64, lat: f64) -> (f64, f64) {
        let (x, y) = self.project_padded(lng, lat);
        let (shift_x, shift_y) = self.centering_shift();
        (x + shift_x, y + shift_y)
    }

    pub fn project_coord(&self, coord: Coord<f64>) -> (f64, f64) {
        self.project(coord.x, coord.y)
    }

    /// Projection anchored at the padded lower-left corner, before centering
    pub fn project_padded(&self, lng: f64, lat: f64) -> (f64, f64) {
        let x = self.padding + (lng - self.min_x) * self.scale;
        let y = self.canvas_height - self.padding - (lat - self.min_y) * self.scale;
        (x, y)
    }

    /// Translation from the padded placement to the centered one
    ///
    /// Both components are zero on an axis where the scaled box exactly
    /// fills the padded area.
    pub fn centering_shift(&self) -> (f64, f64) {
        (
            self.offset_x - self.padding,
            -(self.offset_y - self.padding),
        )
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn square() -> Bounds {
        Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 10.0,
        }
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < EPS && (actual.1 - expected.1).abs() < EPS,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_square_on_default_canvas() {
        let transform = ProjectionTransform::fit(&square(), &Canvas::default()).unwrap();

        // min(360, 260) / 10
        assert!((transform.scale() - 26.0).abs() < EPS);

        assert_close(transform.project_padded(0.0, 0.0), (20.0, 280.0));
        assert_close(transform.centering_shift(), (50.0, 0.0));
        assert_close(transform.project(0.0, 0.0), (70.0, 280.0));
        assert_close(transform.project(10.0, 10.0), (330.0, 20.0));
    }

    #[test]
    fn test_wide_bounds_centered_vertically() {
        let bounds = Bounds {
            min_x: -20.0,
            max_x: 0.0,
            min_y: 40.0,
            max_y: 45.0,
        };
        let transform = ProjectionTransform::fit(&bounds, &Canvas::default()).unwrap();

        // min(360 / 20, 260 / 5) = 18
        assert!((transform.scale() - 18.0).abs() < EPS);
        assert_close(transform.project(-20.0, 40.0), (20.0, 195.0));
        assert_close(transform.project(0.0, 45.0), (380.0, 105.0));

        let (_, bottom) = transform.project(-10.0, 40.0);
        let (_, top) = transform.project(-10.0, 45.0);
        assert!(((bottom + top) / 2.0 - 150.0).abs() < EPS);
    }

    #[test]
    fn test_aspect_preserved_for_many_boxes() {
        let canvas = Canvas::default();
        for (w, h) in [(1.0, 1.0), (0.5, 7.0), (120.0, 3.0), (1e-3, 2e-3)] {
            let bounds = Bounds {
                min_x: -w,
                max_x: 0.0,
                min_y: 10.0,
                max_y: 10.0 + h,
            };
            let transform = ProjectionTransform::fit(&bounds, &canvas).unwrap();
            let (x0, y0) = transform.project(bounds.min_x, bounds.min_y);
            let (x1, y1) = transform.project(bounds.max_x, bounds.max_y);
            let drawn_ratio = (x1 - x0) / (y0 - y1);
            assert!((drawn_ratio - w / h).abs() < 1e-6 * (w / h));
            assert!(x0 >= canvas.padding - EPS && x1 <= canvas.width - canvas.padding + EPS);
            assert!(y1 >= canvas.padding - EPS && y0 <= canvas.height - canvas.padding + EPS);
        }
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let point = Bounds {
            min_x: 5.0,
            max_x: 5.0,
            min_y: 1.0,
            max_y: 1.0,
        };
        assert!(matches!(
            ProjectionTransform::fit(&point, &Canvas::default()),
            Err(RegionError::DegenerateGeometry(_))
        ));

        let flat = Bounds {
            max_y: 0.0,
            ..square()
        };
        assert!(matches!(
            ProjectionTransform::fit(&flat, &Canvas::default()),
            Err(RegionError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_canvas_too_small() {
        let canvas = Canvas {
            width: 40.0,
            height: 300.0,
            padding: 20.0,
        };
        assert!(matches!(
            ProjectionTransform::fit(&square(), &canvas),
            Err(RegionError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = ProjectionTransform::fit(&square(), &Canvas::default()).unwrap();
        let b = ProjectionTransform::fit(&square(), &Canvas::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.project(3.3, 7.7), b.project(3.3, 7.7));
    }
}
