//! The host SVG document: looked up through `roxmltree`, rewritten by splicing attribute text so
//! every byte outside the edited attributes survives unchanged.

use crate::{Error, Result};
use boxfit_core::Edit;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub id: String,
    pub local_name: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    text: String,
}

fn parse(text: &str) -> Result<roxmltree::Document<'_>> {
    // Inkscape documents may carry a DOCTYPE with entity declarations.
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    Ok(roxmltree::Document::parse_with_options(text, opts)?)
}

fn find_by_id<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    id: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    doc.descendants().find(|n| n.is_element() && n.attribute("id") == Some(id))
}

/// Byte offset just past the qualified tag name of the start tag at `tag_start` (`<`).
fn tag_name_end(text: &str, tag_start: usize) -> usize {
    let rest = &text.as_bytes()[tag_start + 1..];
    let len = rest
        .iter()
        .position(|&b| b.is_ascii_whitespace() || matches!(b, b'/' | b'>'))
        .unwrap_or(rest.len());
    tag_start + 1 + len
}

/// Shortest JS-style text for `v`; `None` for NaN and infinities, which have no SVG length form.
pub(crate) fn format_number(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }
    let v = if v == -0.0 { 0.0 } else { v };
    let mut buf = ryu_js::Buffer::new();
    Some(buf.format_finite(v).to_string())
}

impl SvgDocument {
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        parse(&text)?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn element(&self, id: &str) -> Result<Option<ElementInfo>> {
        let doc = parse(&self.text)?;
        Ok(find_by_id(&doc, id).map(|n| ElementInfo {
            id: id.to_string(),
            local_name: n.tag_name().name().to_string(),
            namespace: n.tag_name().namespace().map(str::to_string),
        }))
    }

    pub fn attribute(&self, id: &str, name: &str) -> Result<Option<String>> {
        let doc = parse(&self.text)?;
        Ok(find_by_id(&doc, id).and_then(|n| n.attribute(name).map(str::to_string)))
    }

    /// Sets one attribute, replacing its value in place or inserting it after the tag name.
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<()> {
        let (range, replacement) = {
            let doc = parse(&self.text)?;
            let node = find_by_id(&doc, id).ok_or_else(|| Error::ElementNotFound {
                id: id.to_string(),
            })?;
            let existing = node
                .attributes()
                .find(|a| a.name() == name && a.namespace().is_none());
            match existing {
                Some(attr) => (attr.range_value(), value.to_string()),
                None => {
                    let at = tag_name_end(&self.text, node.range().start);
                    (at..at, format!(" {name}=\"{value}\""))
                }
            }
        };
        self.splice(range, &replacement);
        Ok(())
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.text.replace_range(range, replacement);
    }

    /// Applies edits in order. Later edits to the same attribute overwrite earlier ones.
    ///
    /// Every value is checked before the first write, so a non-finite value leaves the document
    /// untouched. Otherwise there is no rollback: if an edit fails, the ones before it stay applied.
    pub fn apply_edits(&mut self, edits: &[Edit]) -> Result<()> {
        let values = edits
            .iter()
            .map(|edit| {
                format_number(edit.value).ok_or_else(|| {
                    Error::Core(boxfit_core::Error::NonFiniteGeometry {
                        id: edit.id.clone(),
                        attribute: edit.attribute,
                        value: edit.value,
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;
        for (edit, value) in edits.iter().zip(values) {
            tracing::debug!(id = %edit.id, attribute = %edit.attribute, %value, "set attribute");
            self.set_attribute(&edit.id, edit.attribute.name(), &value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfit_core::Attribute;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="r" x="1" y="2" width="3" height="4" style="fill:none"/><path id="p" d="M0 0"/></svg>"#;

    #[test]
    fn format_number_is_shortest_form() {
        assert_eq!(format_number(80.0).as_deref(), Some("80"));
        assert_eq!(format_number(-0.0).as_deref(), Some("0"));
        assert_eq!(format_number(697.5).as_deref(), Some("697.5"));
        assert_eq!(format_number(0.1 + 0.2).as_deref(), Some("0.30000000000000004"));
        assert_eq!(format_number(f64::NAN), None);
        assert_eq!(format_number(f64::NEG_INFINITY), None);
    }

    #[test]
    fn element_reports_local_name_and_namespace() {
        let doc = SvgDocument::parse(SVG).unwrap();
        let el = doc.element("r").unwrap().unwrap();
        assert_eq!(el.local_name, "rect");
        assert_eq!(el.namespace.as_deref(), Some("http://www.w3.org/2000/svg"));
        assert_eq!(doc.element("nope").unwrap(), None);
    }

    #[test]
    fn set_attribute_replaces_value_in_place() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        doc.set_attribute("r", "width", "90").unwrap();
        assert_eq!(doc.as_str(), SVG.replace(r#"width="3""#, r#"width="90""#));
        assert_eq!(doc.attribute("r", "width").unwrap().as_deref(), Some("90"));
        assert_eq!(doc.attribute("r", "style").unwrap().as_deref(), Some("fill:none"));
    }

    #[test]
    fn set_attribute_inserts_missing_attribute() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        doc.set_attribute("p", "x", "5").unwrap();
        assert!(doc.as_str().contains(r#"<path x="5" id="p" d="M0 0"/>"#));
    }

    #[test]
    fn apply_edits_unknown_id_fails() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let err = doc
            .apply_edits(&[Edit {
                id: "ghost".to_string(),
                attribute: Attribute::X,
                value: 1.0,
            }])
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { ref id } if id == "ghost"));
        assert_eq!(doc.as_str(), SVG);
    }

    #[test]
    fn apply_edits_rejects_non_finite_values_before_writing() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let edit = |attribute, value| Edit {
            id: "r".to_string(),
            attribute,
            value,
        };
        let err = doc
            .apply_edits(&[edit(Attribute::X, 5.0), edit(Attribute::Width, f64::INFINITY)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(boxfit_core::Error::NonFiniteGeometry {
                attribute: Attribute::Width,
                ..
            })
        ));
        assert_eq!(doc.as_str(), SVG);
    }

    #[test]
    fn tag_name_end_handles_prefixed_and_empty_tags() {
        let text = "<svg:rect/>";
        assert_eq!(&text[..tag_name_end(text, 0)], "<svg:rect");
        let text = "<g>";
        assert_eq!(&text[..tag_name_end(text, 0)], "<g");
    }
}
