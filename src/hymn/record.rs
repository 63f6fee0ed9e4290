use crate::hymn::HymnInfo;
use serde::{Deserialize, Serialize};

/// One hymn extracted from a detail page
///
/// Field order matches the key order of the objects in the output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HymnRecord {
    /// Refrain text, empty when the hymn has none
    pub refrain: String,

    /// Verse texts in document order, refrain excluded
    pub verses: Vec<String>,

    /// Category label from the detail page's own category block
    pub category: String,

    /// Hymn number, taken from the URL slug
    pub number: String,

    /// Hymn title, taken from the URL slug
    pub title: String,
}

impl HymnRecord {
    /// Assembles a record from page content and the slug-derived info
    pub fn new(info: HymnInfo, category: String, refrain: String, verses: Vec<String>) -> Self {
        Self {
            refrain,
            verses,
            category,
            number: info.number,
            title: info.title,
        }
    }

    /// Returns true if the hymn carries a refrain
    pub fn has_refrain(&self) -> bool {
        !self.refrain.is_empty()
    }
}
