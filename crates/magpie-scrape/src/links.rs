use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

/// Scheme and host every scraped profile path is rewritten against.
pub const SITE_ORIGIN: &str = "https://www.linkedin.com";

/// Path prefix that marks an anchor as a profile link.
const PROFILE_PATH_PREFIX: &str = "/in";

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

static ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse(SITE_ORIGIN).expect("site origin is a valid URL"));

/// Extract the set of absolute profile links from a rendered page.
///
/// Any anchor whose `href` starts with the profile path prefix counts;
/// duplicates collapse into the set. A page without matches yields an empty
/// set rather than an error.
pub fn profile_links(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHORS)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(PROFILE_PATH_PREFIX))
        .filter_map(|href| ORIGIN.join(href).ok())
        .map(|url| url.to_string())
        .collect()
}
