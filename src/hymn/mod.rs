//! Hymn data model
//!
//! - `HymnRecord`: one extracted hymn, as written to the output file
//! - `HymnInfo`: the number and title encoded in a detail-page URL

mod record;
mod slug;

pub use record::HymnRecord;
pub use slug::{hymn_info_from_url, HymnInfo};
