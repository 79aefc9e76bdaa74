//! SVG serializer for state maps.
//!
//! One `<path>` for the outline, then a halo and a dot `<circle>` per metro.
//! Colors use `currentColor` so the embedding page controls them. This is a
//! pure function; writing files is left to the output layer.

use std::fmt::Write;

use super::markers::PlacedMarker;
use super::path::{PathCommand, to_svg_d};
use crate::geometry::Canvas;

/// Escape the five XML special characters for attribute values
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub fn to_svg(canvas: &Canvas, outline: &[PathCommand], markers: &[PlacedMarker]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" class="state-outline-svg">"#,
        canvas.width, canvas.height,
    );

    let _ = writeln!(
        out,
        r#"  <path d="{}" fill="none" stroke="currentColor" stroke-width="2" opacity="0.8" class="state-boundary"/>"#,
        to_svg_d(outline),
    );

    for marker in markers {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.1}" fill="currentColor" opacity="0.2" class="metro-pulse rank-{}"/>"#,
            marker.x, marker.y, marker.halo_radius, marker.rank,
        );
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.1}" fill="currentColor" opacity="0.9" class="metro-dot rank-{}" data-city="{}" data-rank="{}"/>"#,
            marker.x,
            marker.y,
            marker.radius,
            marker.rank,
            xml_escape(&marker.label),
            marker.rank,
        );
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(label: &str, rank: u32) -> PlacedMarker {
        PlacedMarker {
            x: 120.5,
            y: 80.25,
            radius: 6.8,
            halo_radius: 10.8,
            rank,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_viewbox_and_outline() {
        let outline = vec![
            PathCommand::Move { x: 20.0, y: 20.0 },
            PathCommand::Line { x: 380.0, y: 280.0 },
            PathCommand::Close,
        ];
        let svg = to_svg(&Canvas::default(), &outline, &[]);

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 400 300""#));
        assert!(svg.contains(r#"d="M 20.00 20.00 L 380.00 280.00 Z""#));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_marker_circles() {
        let svg = to_svg(&Canvas::default(), &[], &[marker("Tacoma", 2)]);

        assert!(svg.contains(
            r#"<circle cx="120.50" cy="80.25" r="10.8" fill="currentColor" opacity="0.2" class="metro-pulse rank-2"/>"#
        ));
        assert!(svg.contains(r#"r="6.8" fill="currentColor" opacity="0.9" class="metro-dot rank-2""#));
        assert!(svg.contains(r#"data-city="Tacoma" data-rank="2""#));

        let halo = svg.find("metro-pulse").unwrap();
        let dot = svg.find("metro-dot").unwrap();
        assert!(halo < dot);
    }

    #[test]
    fn test_city_names_escaped() {
        let svg = to_svg(&Canvas::default(), &[], &[marker("Coeur d'Alene", 4)]);
        assert!(svg.contains(r#"data-city="Coeur d&apos;Alene""#));
    }
}
