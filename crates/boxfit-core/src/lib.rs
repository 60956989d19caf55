#![forbid(unsafe_code)]

//! Headless core of `boxfit`: size a box around the text element it sits next to.
//!
//! Everything here is pure. Geometry comes in through [`GeometryProvider`], edits go out as a
//! [`MatchPlan`]; reading and writing the SVG document is the `boxfit` crate's job.

pub mod error;
pub mod geom;
pub mod matcher;
pub mod padding;
pub mod provider;
pub mod query;

pub use error::{Error, Result};
pub use geom::BBox;
pub use matcher::{
    Attribute, Edit, ElementKind, Match, MatchPlan, SelectedElement, classify, match_boxes,
};
pub use padding::Padding;
pub use provider::{GeometryProvider, StaticGeometry};
pub use query::{GeometryMap, parse_query_all};

#[cfg(test)]
mod tests;
