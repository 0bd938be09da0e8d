use serde::{Deserialize, Serialize};

use crate::FormEntry;

/// Ordered list of forms available to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    forms: Vec<FormEntry>,
}

/// Result of narrowing a catalog by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub catalog: Catalog,
    pub matched: usize,
    pub total: usize,
}

impl Catalog {
    pub fn new(forms: Vec<FormEntry>) -> Self {
        Self { forms }
    }

    pub fn forms(&self) -> &[FormEntry] {
        &self.forms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormEntry> {
        self.forms.iter()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Keep entries whose name contains `needle` (case-sensitive), in order.
    ///
    /// `None` keeps everything. `self` is never modified.
    pub fn filter(&self, needle: Option<&str>) -> FilterOutcome {
        let total = self.forms.len();
        let forms: Vec<FormEntry> = match needle {
            Some(needle) => self
                .forms
                .iter()
                .filter(|form| form.name.contains(needle))
                .cloned()
                .collect(),
            None => self.forms.clone(),
        };
        FilterOutcome {
            matched: forms.len(),
            total,
            catalog: Catalog { forms },
        }
    }
}

impl From<Vec<FormEntry>> for Catalog {
    fn from(forms: Vec<FormEntry>) -> Self {
        Self::new(forms)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FormEntry;
    type IntoIter = std::slice::Iter<'a, FormEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.iter()
    }
}
