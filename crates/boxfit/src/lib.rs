#![forbid(unsafe_code)]

//! Size the selected boxes of an SVG document around their nearest selected text.
//!
//! This is the host side of `boxfit`: it reads and rewrites the SVG, resolves the selection and
//! asks Inkscape (or any other [`GeometryProvider`]) for bounding boxes. The matching itself lives
//! in [`boxfit_core`].

pub mod document;
pub mod error;
pub mod inkscape;
pub mod selection;

pub use boxfit_core::{
    Attribute, BBox, Edit, ElementKind, GeometryMap, GeometryProvider, Match, MatchPlan, Padding,
    SelectedElement, StaticGeometry,
};
pub use document::SvgDocument;
pub use error::{Error, Result};
pub use inkscape::InkscapeQuery;
pub use selection::Selection;

pub use boxfit_core;

/// Runs one fit: selection, geometry, matching, then the attribute writes.
#[derive(Debug, Clone, Default)]
pub struct Engine<P> {
    provider: P,
}

impl<P: GeometryProvider> Engine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Rewrites `doc` in place and returns what was matched and written.
    ///
    /// Geometry is only queried when the selection holds at least one text element. Errors raised
    /// before the write phase leave `doc` untouched.
    pub fn fit<I, S>(&self, doc: &mut SvgDocument, ids: I, padding: &Padding) -> Result<MatchPlan>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = Selection::from_ids(doc, ids)?;
        if !selection.has_text() {
            tracing::info!(
                selected = selection.elements().len(),
                "no text element selected; nothing to do"
            );
            return Ok(MatchPlan::default());
        }

        let geometry = self.provider.resolve(doc.as_str())?;
        let plan = boxfit_core::match_boxes(selection.elements(), &geometry, padding)?;
        doc.apply_edits(&plan.edits)?;
        tracing::info!(
            matches = plan.matches.len(),
            edits = plan.edits.len(),
            "fitted boxes to text"
        );
        Ok(plan)
    }
}
