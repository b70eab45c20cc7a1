use anyhow::Result;
use async_trait::async_trait;
use magpie_browser::Session;
use magpie_core::store;
use magpie_scrape::{page_url, profile_links, search_url, PageState};
use std::path::Path;

/// Rendered-page source for the crawl loop.
///
/// The live implementation drives the browser; tests substitute canned pages
/// so the loop runs without Chrome.
#[async_trait]
pub trait SearchSession {
    /// Navigate to `url`, trigger lazy-loaded content, and return the
    /// rendered HTML.
    async fn fetch_rendered(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl SearchSession for Session {
    async fn fetch_rendered(&self, url: &str) -> Result<String> {
        self.goto(url).await?;
        println!("The search page {url} has been opened");
        self.scroll_to_bottom().await?;
        Ok(self.rendered_html().await?)
    }
}

/// Crawl the search results for `keyword`, appending each page's profile
/// links to `output`.
///
/// Pagination is driven by the site's own reported state: the loop continues
/// while a next-page marker is present and the current page number is below
/// `page_limit`. The limit check happens before fetching the next page, so a
/// limit of 1 collects exactly one page. Errors are not retried; any
/// navigation or parse failure aborts the whole run.
pub async fn execute<S, P>(
    session: &S,
    pager: &P,
    keyword: &str,
    page_limit: u32,
    output: &Path,
) -> Result<()>
where
    S: SearchSession + Sync,
    P: PageState + Sync,
{
    println!("Visiting the search page for {keyword}");
    let search = search_url(keyword);

    let mut html = session.fetch_rendered(&search).await?;
    collect_and_store(&html, output)?;

    while pager.has_next_page(&html) {
        let current = pager.current_page(&html)?;
        if current >= page_limit {
            tracing::debug!("Reached the page limit of {page_limit}");
            break;
        }

        html = session.fetch_rendered(&page_url(&search, current + 1)).await?;
        collect_and_store(&html, output)?;
    }

    Ok(())
}

fn collect_and_store(html: &str, output: &Path) -> Result<usize> {
    println!("Collecting links to people from the page");
    let links = profile_links(html);
    println!("{} links have been scraped", links.len());

    if !links.is_empty() {
        store::append_links(output, &links)?;
    }
    Ok(links.len())
}
