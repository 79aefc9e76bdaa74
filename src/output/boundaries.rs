//! Boundary writers: a TypeScript data module for the front end, or plain
//! JSON with the mask rings precomputed.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use super::write_text;
use crate::domain::{BoundaryRecord, LatLng};
use crate::geometry::build_mask;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BoundaryFormat {
    #[default]
    Ts,
    Json,
}

/// Words that stay quoted even though they lex as identifiers
const RESERVED_KEYS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "of", "return", "super", "switch", "this", "throw", "true",
    "try", "typeof", "var", "void", "while", "with", "yield",
];

fn needs_quotes(key: &str) -> bool {
    let mut chars = key.chars();
    let valid_identifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    !valid_identifier || RESERVED_KEYS.contains(&key)
}

pub fn render_boundaries_ts(records: &[BoundaryRecord]) -> String {
    let mut out = String::new();

    out.push_str("export interface StateBoundary {\n");
    out.push_str("  coordinates: Array<{ lat: number; lng: number }>;\n");
    out.push_str("}\n\n");
    out.push_str("export const STATE_BOUNDARIES: Record<string, StateBoundary> = {\n");

    for record in records {
        if needs_quotes(&record.slug) {
            let _ = writeln!(out, "  \"{}\": {{", record.slug);
        } else {
            let _ = writeln!(out, "  {}: {{", record.slug);
        }
        out.push_str("    coordinates: [\n");
        for p in &record.coordinates {
            let _ = writeln!(out, "      {{ lat: {}, lng: {} }},", p.lat, p.lng);
        }
        out.push_str("    ],\n");
        out.push_str("  },\n");
    }

    out.push_str("};\n\n");
    out.push_str(
        "export function getStateBoundary(stateSlug: string): StateBoundary | null {\n  return STATE_BOUNDARIES[stateSlug] || null;\n}\n\n",
    );
    // Same shoelace sum and flip rule as `geometry::build_mask`, so the TS
    // mask and the JSON mask wind identically.
    out.push_str("function signedArea2(ring: Array<{ lat: number; lng: number }>): number {\n");
    out.push_str("  let sum = 0;\n");
    out.push_str("  for (let i = 0; i + 1 < ring.length; i++) {\n");
    out.push_str("    sum += ring[i].lng * ring[i + 1].lat - ring[i + 1].lng * ring[i].lat;\n");
    out.push_str("  }\n");
    out.push_str("  return sum;\n");
    out.push_str("}\n\n");
    out.push_str(
        "export function createMaskPolygon(stateBoundary: StateBoundary): Array<Array<{ lat: number; lng: number }>> {\n",
    );
    out.push_str("  const worldBounds = [\n");
    for p in crate::geometry::mask::WORLD_RING {
        let _ = writeln!(out, "    {{ lat: {}, lng: {} }},", p.lat, p.lng);
    }
    out.push_str("  ];\n\n");
    out.push_str("  const stateHole = [...stateBoundary.coordinates].reverse();\n");
    out.push_str("  if (signedArea2(stateHole) > 0) {\n");
    out.push_str("    worldBounds.reverse();\n");
    out.push_str("  }\n\n");
    out.push_str("  return [worldBounds, stateHole];\n");
    out.push_str("}\n");

    out
}

#[derive(Serialize)]
struct BoundaryEntry<'a> {
    coordinates: &'a [LatLng],
    mask: [Vec<LatLng>; 2],
}

/// `{ slug: { coordinates, mask: [outer, hole] } }`, keys sorted
pub fn render_boundaries_json(records: &[BoundaryRecord]) -> Result<String> {
    let entries: BTreeMap<&str, BoundaryEntry<'_>> = records
        .iter()
        .map(|record| {
            let mask = build_mask(&record.coordinates);
            (
                record.slug.as_str(),
                BoundaryEntry {
                    coordinates: &record.coordinates,
                    mask: [mask.outer, mask.hole],
                },
            )
        })
        .collect();

    serde_json::to_string_pretty(&entries).context("Failed to serialize boundaries")
}

pub fn write_boundaries(path: &Path, records: &[BoundaryRecord], format: BoundaryFormat) -> Result<()> {
    let contents = match format {
        BoundaryFormat::Ts => render_boundaries_ts(records),
        BoundaryFormat::Json => render_boundaries_json(records)?,
    };
    write_text(path, &contents)
}
