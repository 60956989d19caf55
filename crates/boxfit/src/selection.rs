use crate::document::SvgDocument;
use crate::{Error, Result};
use boxfit_core::{ElementKind, SelectedElement};

/// The selected elements of one invocation, in the order the host listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    elements: Vec<SelectedElement>,
}

impl Selection {
    /// Resolves ids against `doc`. Empty ids are skipped and repeats keep their first position.
    pub fn from_ids<I, S>(doc: &SvgDocument, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut elements: Vec<SelectedElement> = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if id.is_empty() || elements.iter().any(|e| e.id == id) {
                continue;
            }
            let info = doc.element(id)?.ok_or_else(|| Error::ElementNotFound {
                id: id.to_string(),
            })?;
            elements.push(SelectedElement::new(id, info.local_name));
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[SelectedElement] {
        &self.elements
    }

    pub fn has_text(&self) -> bool {
        self.elements.iter().any(|e| e.kind == ElementKind::Text)
    }
}
