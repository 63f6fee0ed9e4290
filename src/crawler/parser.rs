//! HTML parsing for listing and detail pages
//!
//! All assumptions about the hymnal site's markup live in `HymnalMarkup`:
//! - listing pages wrap each hymn link in a `div.readMore`
//! - detail pages hold the hymn text in the first table of `div.main-container`
//!   (or loose in the container when the table markup is malformed)
//! - detail pages name their category in the first link of the table inside
//!   `div.post-categories`, or of the block itself when the link was written
//!   directly inside `<table>`

use crate::hymn::{hymn_info_from_url, HymnRecord};
use crate::url::resolve_link;
use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Label that marks a paragraph as the refrain
pub const REFRAIN_LABEL: &str = "Refrain";

/// Compiled selectors describing the hymnal site's markup
pub struct HymnalMarkup {
    read_more: Selector,
    main_container: Selector,
    post_categories: Selector,
    table: Selector,
    paragraph: Selector,
    link: Selector,
}

impl HymnalMarkup {
    /// Compiles the selectors for the hymnal site
    pub fn new() -> Self {
        Self {
            read_more: selector("div.readMore"),
            main_container: selector("div.main-container"),
            post_categories: selector("div.post-categories"),
            table: selector("table"),
            paragraph: selector("p"),
            link: selector("a"),
        }
    }

    /// Returns the process-wide selector set
    pub fn shared() -> &'static HymnalMarkup {
        static MARKUP: OnceLock<HymnalMarkup> = OnceLock::new();
        MARKUP.get_or_init(HymnalMarkup::new)
    }
}

impl Default for HymnalMarkup {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hard-coded selector is valid CSS")
}

/// Extracts the hymn detail links from a listing page
///
/// Each `readMore` container contributes the href of its first link,
/// resolved against `base_url`. Containers without a usable link contribute
/// nothing, and a page without containers yields an empty list.
///
/// # Example
///
/// ```
/// use hymnal_crawler::crawler::{extract_hymn_links, HymnalMarkup};
/// use url::Url;
///
/// let html = r#"<div class="readMore"><a href="/Hymnal/1-praise/">Read more</a></div>"#;
/// let base = Url::parse("https://example.com/Hymnal/category/001-100/").unwrap();
/// let links = extract_hymn_links(HymnalMarkup::shared(), html, &base);
/// assert_eq!(links, vec!["https://example.com/Hymnal/1-praise/".to_string()]);
/// ```
pub fn extract_hymn_links(markup: &HymnalMarkup, html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&markup.read_more)
        .filter_map(|container| container.select(&markup.link).next())
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Parses a hymn detail page into a record
///
/// The number and title come from `url`; refrain, verses and category come
/// from the page.
///
/// # Returns
///
/// * `Ok(HymnRecord)` - The extracted hymn
/// * `Err(ExtractError)` - The page or URL does not have the expected shape
pub fn parse_hymn_page(
    markup: &HymnalMarkup,
    html: &str,
    url: &str,
) -> Result<HymnRecord, ExtractError> {
    let document = Html::parse_document(html);
    let missing = |element: &'static str| ExtractError::MissingElement {
        url: url.to_string(),
        element,
    };

    let main_container = document
        .select(&markup.main_container)
        .next()
        .ok_or_else(|| missing("main container"))?;
    let verse_table = main_container
        .select(&markup.table)
        .next()
        .ok_or_else(|| missing("verse table"))?;

    // The HTML parser moves a paragraph written directly inside <table> out in
    // front of it, so fall back to the container when the table has none
    let verse_scope = if verse_table.select(&markup.paragraph).next().is_some() {
        verse_table
    } else {
        main_container
    };
    let paragraphs = verse_scope.select(&markup.paragraph).map(element_text);
    let (refrain, verses) = split_refrain(paragraphs);

    let category_block = document
        .select(&markup.post_categories)
        .next()
        .ok_or_else(|| missing("category block"))?;
    let category_table = category_block
        .select(&markup.table)
        .next()
        .ok_or_else(|| missing("category table"))?;
    let category = category_table
        .select(&markup.link)
        .next()
        .or_else(|| category_block.select(&markup.link).next())
        .map(element_text)
        .ok_or_else(|| missing("category link"))?;

    let info = hymn_info_from_url(url)?;

    Ok(HymnRecord::new(info, category, refrain, verses))
}

/// Separates the refrain from the verses
///
/// Each paragraph is split on its first newline. A head equal to
/// `REFRAIN_LABEL` makes the remainder the refrain (last one wins); any other
/// paragraph contributes its remainder as a verse. A paragraph without a
/// newline is its own remainder. Empty paragraphs are dropped.
pub fn split_refrain<I>(paragraphs: I) -> (String, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut refrain = String::new();
    let mut verses = Vec::new();

    for text in paragraphs {
        if text.is_empty() {
            continue;
        }

        let (head, rest) = match text.split_once('\n') {
            Some((head, rest)) => (head, rest),
            None => (text.as_str(), text.as_str()),
        };

        if head == REFRAIN_LABEL {
            refrain = rest.to_string();
        } else {
            verses.push(rest.to_string());
        }
    }

    (refrain, verses)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
