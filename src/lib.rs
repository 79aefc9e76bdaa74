//! statemaps - Simplified state boundaries and metro-marker SVG maps from GeoJSON

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod render;

pub use error::RegionError;
