use crate::album::Materializer;
use crate::dom;
use crate::error::MaterializeError;
use crate::fetch::Fetcher;
use scraper::Html;
use std::path::PathBuf;
use url::Url;

/// Attribute marking each release on a storefront's music page.
pub const ITEM_ATTR: &str = "data-item-id";

/// Path prefix of album pages, as opposed to single tracks or merch.
pub const ALBUM_PATH_PREFIX: &str = "/album";

/// Outcome of downloading every album of a storefront.
#[derive(Debug, Default)]
pub struct StorefrontReport {
    /// Directories of albums that were written completely.
    pub albums: Vec<PathBuf>,
    /// Albums that failed, in the order they were attempted.
    pub failures: Vec<AlbumFailure>,
}

#[derive(Debug)]
pub struct AlbumFailure {
    pub url: String,
    pub error: MaterializeError,
}

impl StorefrontReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<F: Fetcher> Materializer<F> {
    /// Download every album linked from a storefront's music page.
    ///
    /// Only a failure to fetch the listing itself is returned as an error.
    /// A failing album is recorded in the report and the next one is
    /// attempted, unlike [`Materializer::materialize`], which stops at
    /// the first failure.
    pub async fn materialize_storefront(
        &self,
        listing_url: &Url,
    ) -> Result<StorefrontReport, MaterializeError> {
        tracing::info!(url = %listing_url, "Fetching storefront");
        let html = self.fetch_page(listing_url.as_str()).await?;

        let album_urls = album_links(&html, listing_url);
        tracing::info!(albums = album_urls.len(), "Found albums");

        let mut report = StorefrontReport::default();
        for url in album_urls {
            match self.materialize(url.as_str()).await {
                Ok(dir) => report.albums.push(dir),
                Err(error) => {
                    tracing::warn!(url = %url, error = %error, "Album failed");
                    report.failures.push(AlbumFailure {
                        url: url.to_string(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}

/// Absolute URLs of the album pages listed on a storefront page, in
/// page order. Each item contributes the `href` of its first anchor child.
///
/// Only site-relative hrefs under `/album` count. Links to other hosts and
/// path-relative hrefs are skipped before resolving against `base`.
fn album_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    dom::find_with_attr(document.tree.root(), ITEM_ATTR)
        .into_iter()
        .filter_map(dom::first_child_href)
        .filter(|href| {
            let keep = href.starts_with(ALBUM_PATH_PREFIX);
            if !keep {
                tracing::debug!(href = %href, "Skipping non-album link");
            }
            keep
        })
        .filter_map(|href| match base.join(&href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(href = %href, error = %e, "Skipping unparsable link");
                None
            }
        })
        .collect()
}
