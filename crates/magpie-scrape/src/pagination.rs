use crate::{Error, Result};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Class the site puts on pagination button labels.
const PAGINATION_MARKER_CLASS: &str = "artdeco-button__text";

static SPANS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("span selector is valid"));

static BUTTONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("button").expect("button selector is valid"));

/// Pagination state read from rendered search-result HTML.
///
/// The matching strategy sits behind this trait so it can be swapped for a
/// CSS-selector or test-id based extractor without touching the crawl loop.
pub trait PageState {
    /// Whether the page advertises a further page of results.
    fn has_next_page(&self, html: &str) -> bool;

    /// The page number the site reports as current.
    fn current_page(&self, html: &str) -> Result<u32>;
}

/// Text-heuristic extractor matching the site's pagination markup: a "next"
/// span carrying the pagination marker class, and a button announcing the
/// current page with the number on its leading text line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ButtonTextPagination;

impl PageState for ButtonTextPagination {
    fn has_next_page(&self, html: &str) -> bool {
        let document = Html::parse_document(html);

        document.select(&SPANS).any(|span| {
            span.text().collect::<String>().to_lowercase().contains("next")
                && span
                    .value()
                    .classes()
                    .any(|class| class == PAGINATION_MARKER_CLASS)
        })
    }

    fn current_page(&self, html: &str) -> Result<u32> {
        let document = Html::parse_document(html);

        for button in document.select(&BUTTONS) {
            let text = button.text().collect::<String>();
            if !text.to_lowercase().contains("current page") {
                continue;
            }

            let leading = text.trim().lines().next().unwrap_or_default().trim();
            return leading
                .parse()
                .map_err(|_| Error::InvalidPageNumber(leading.to_string()));
        }

        Err(Error::PaginationUiNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGER: ButtonTextPagination = ButtonTextPagination;

    #[test]
    fn test_next_span_with_marker_class_is_detected() {
        let html = r#"
            <button class="artdeco-button">
                <span class="artdeco-button__text">Next</span>
            </button>
        "#;

        assert!(PAGER.has_next_page(html));
    }

    #[test]
    fn test_next_span_without_marker_class_is_not_pagination() {
        let html = r#"<span class="headline">What's next for you?</span>"#;

        assert!(!PAGER.has_next_page(html));
    }

    #[test]
    fn test_page_without_spans_has_no_next() {
        assert!(!PAGER.has_next_page("<html><body><p>done</p></body></html>"));
    }

    #[test]
    fn test_current_page_number_is_parsed_from_leading_line() {
        let html = r#"
            <button aria-current="true" class="artdeco-pagination__indicator">
                7
                <span class="a11y-text">Current page</span>
            </button>
        "#;

        assert_eq!(PAGER.current_page(html).unwrap(), 7);
    }

    #[test]
    fn test_missing_current_page_button_is_an_error() {
        let result = PAGER.current_page("<html><body></body></html>");
        assert!(matches!(result, Err(Error::PaginationUiNotFound)));
    }

    #[test]
    fn test_unparseable_page_number_is_an_error() {
        let html = r#"
            <button>
                seven
                <span>Current page</span>
            </button>
        "#;

        assert!(matches!(
            PAGER.current_page(html),
            Err(Error::InvalidPageNumber(_))
        ));
    }
}
