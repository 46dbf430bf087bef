//! Extraction of boundary file links from the index page

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::FetchError;

/// Path prefix of the boundary text files on the IAU site
pub const DEFAULT_HREF_PREFIX: &str = "/static/public/constellations/txt";
/// Link text of the plain text download next to each constellation
pub const DEFAULT_LINK_TEXT: &str = "TXT";

/// Which anchors on the page point at boundary files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPattern {
    /// Required start of the `href` attribute
    pub href_prefix: String,
    /// Required link text, compared after trimming whitespace
    pub link_text: String,
}

impl Default for LinkPattern {
    fn default() -> Self {
        Self {
            href_prefix: DEFAULT_HREF_PREFIX.to_string(),
            link_text: DEFAULT_LINK_TEXT.to_string(),
        }
    }
}

/// Find all matching anchors in `html` and resolve them against `page_url`.
///
/// Links keep page order; repeated links are returned once.
pub fn extract_links(
    html: &str,
    page_url: &Url,
    pattern: &LinkPattern,
) -> Result<Vec<Url>, FetchError> {
    let query = format!(r#"a[href^="{}"]"#, pattern.href_prefix);
    let selector = Selector::parse(&query).map_err(|e| FetchError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for anchor in document.select(&selector) {
        let text: String = anchor.text().collect();
        if text.trim() != pattern.link_text {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let url = page_url.join(href).map_err(|source| FetchError::Url {
            url: href.to_string(),
            source,
        })?;
        if seen.insert(url.clone()) {
            urls.push(url);
        }
    }

    Ok(urls)
}

/// Local file name for a download: the last path segment of its URL
pub fn file_name(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}
