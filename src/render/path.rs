//! Outline path assembly.
//!
//! Rings are walked through a [`ProjectionTransform`] and turned into a flat
//! list of move/line/close commands. The commands carry no markup; the SVG
//! serializer (or any other renderer) decides how to spell them.

use geo::Coord;
use serde::Serialize;
use std::fmt::Write;

use crate::geometry::ProjectionTransform;

/// One drawing instruction in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PathCommand {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Close,
}

/// Round to 2 decimal places, folding -0.0 into 0.0
pub(crate) fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Project each ring and emit `Move`, one `Line` per following point, then
/// `Close`
///
/// Rings are concatenated in the order given. Empty rings contribute
/// nothing. Coordinates are rounded to 2 decimal places.
pub fn assemble_path<'a, I>(rings: I, transform: &ProjectionTransform) -> Vec<PathCommand>
where
    I: IntoIterator<Item = &'a [Coord<f64>]>,
{
    let mut commands = Vec::new();

    for ring in rings {
        if ring.is_empty() {
            continue;
        }

        for (i, &coord) in ring.iter().enumerate() {
            let (x, y) = transform.project_coord(coord);
            let (x, y) = (round2(x), round2(y));
            if i == 0 {
                commands.push(PathCommand::Move { x, y });
            } else {
                commands.push(PathCommand::Line { x, y });
            }
        }
        commands.push(PathCommand::Close);
    }

    commands
}

/// Spell commands as an SVG `d` attribute, e.g. `M 1.00 2.00 L 3.00 4.00 Z`
pub fn to_svg_d(commands: &[PathCommand]) -> String {
    let mut d = String::with_capacity(commands.len() * 16);

    for (i, command) in commands.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = match command {
            PathCommand::Move { x, y } => write!(d, "M {:.2} {:.2}", x, y),
            PathCommand::Line { x, y } => write!(d, "L {:.2} {:.2}", x, y),
            PathCommand::Close => write!(d, "Z"),
        };
    }

    d
}
