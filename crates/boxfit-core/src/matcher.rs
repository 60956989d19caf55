//! Pairs each selected text element with its nearest box and computes the box's new geometry.

use crate::geom::{BBox, Point};
use crate::padding::Padding;
use crate::query::GeometryMap;
use crate::{Error, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Renders text content; drives the resize.
    Text,
    /// Anything else in the selection; the resize target.
    Box,
}

/// Classifies an element by its local tag name (`text`, `flowRoot`, `rect`, ...).
pub fn classify(local_name: &str) -> ElementKind {
    if local_name.ends_with("text") || local_name == "flowRoot" {
        ElementKind::Text
    } else {
        ElementKind::Box
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedElement {
    pub id: String,
    pub tag: String,
    pub kind: ElementKind,
}

impl SelectedElement {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let kind = classify(&tag);
        Self {
            id: id.into(),
            tag,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    X,
    Y,
    Width,
    Height,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Width => "width",
            Attribute::Height => "height",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute write against the host document.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub id: String,
    pub attribute: Attribute,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub text_id: String,
    pub box_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchPlan {
    pub matches: Vec<Match>,
    pub edits: Vec<Edit>,
}

fn bbox_of<'a>(geometry: &'a GeometryMap, id: &str) -> Result<&'a BBox> {
    geometry.get(id).ok_or_else(|| Error::MissingGeometry { id: id.to_string() })
}

/// Returns the id of the box whose center is closest to `text_center`.
///
/// Exact ties resolve to the lowest id: candidates are visited in ascending id order and only a
/// strictly smaller distance replaces the current best.
pub fn nearest_box<'a>(
    text_center: Point,
    box_centers: &'a BTreeMap<String, Point>,
) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for (id, c) in box_centers {
        let d = (text_center.x - c.x).hypot(text_center.y - c.y);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((id.as_str(), d)),
        }
    }
    best.map(|(id, _)| id)
}

/// Geometry a box must take to frame `text` with `padding`.
pub fn framed(text: &BBox, padding: &Padding) -> BBox {
    BBox::new(
        text.x - padding.left,
        text.y - padding.top,
        text.width + padding.left + padding.right,
        text.height + padding.top + padding.bottom,
    )
}

fn edits_for(box_id: &str, target: BBox) -> Result<[Edit; 4]> {
    let edit = |attribute, value: f64| {
        if !value.is_finite() {
            return Err(Error::NonFiniteGeometry {
                id: box_id.to_string(),
                attribute,
                value,
            });
        }
        Ok(Edit {
            id: box_id.to_string(),
            attribute,
            value,
        })
    };
    Ok([
        edit(Attribute::X, target.x)?,
        edit(Attribute::Y, target.y)?,
        edit(Attribute::Width, target.width)?,
        edit(Attribute::Height, target.height)?,
    ])
}

/// Computes the attribute writes that size each selected box around its nearest selected text.
///
/// Text elements are processed in selection order. The result depends only on the text geometry
/// and the padding, never on the current geometry of the box being resized beyond its center.
pub fn match_boxes(
    selection: &[SelectedElement],
    geometry: &GeometryMap,
    padding: &Padding,
) -> Result<MatchPlan> {
    let mut box_centers = BTreeMap::new();
    for el in selection {
        if el.id.is_empty() || el.kind != ElementKind::Box {
            continue;
        }
        box_centers.insert(el.id.clone(), bbox_of(geometry, &el.id)?.center());
    }

    let mut plan = MatchPlan::default();
    for el in selection {
        if el.id.is_empty() || el.kind != ElementKind::Text {
            continue;
        }
        let text = bbox_of(geometry, &el.id)?;
        let Some(box_id) = nearest_box(text.center(), &box_centers) else {
            return Err(Error::NoCandidateBox {
                text_id: el.id.clone(),
            });
        };
        tracing::debug!(text_id = %el.id, box_id, "matched text to box");
        plan.edits.extend(edits_for(box_id, framed(text, padding))?);
        plan.matches.push(Match {
            text_id: el.id.clone(),
            box_id: box_id.to_string(),
        });
    }
    Ok(plan)
}
