use crate::dom;
use crate::error::MaterializeError;
use crate::fetch::{Fetcher, ResponseBody};
use crate::output;
use crate::tag::{self, TrackTags};
use bandit_model::{Album, Track, YearClock};
use scraper::Html;
use std::path::{Path, PathBuf};

/// Attribute holding the album JSON on storefront album pages.
pub const TRALBUM_ATTR: &str = "data-tralbum";

/// How albums are written to disk.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Replace filesystem-reserved characters in names with lookalikes.
    pub safe_names: bool,
    /// Root of the `{artist}/{title} ({year})` layout.
    pub output_dir: PathBuf,
    /// Clock the release year is read on, for folder names and tags.
    pub year_clock: YearClock,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            safe_names: true,
            output_dir: PathBuf::from("."),
            year_clock: YearClock::Local,
        }
    }
}

/// Downloads storefront albums into a tagged directory layout.
#[derive(Debug)]
pub struct Materializer<F> {
    fetcher: F,
    options: MaterializeOptions,
}

/// Cover art held in memory until the album directory exists.
struct CoverArt {
    /// Thumbnail embedded in each track.
    small: Vec<u8>,
    /// Full-size image saved as `cover.jpg`.
    large: Vec<u8>,
}

impl<F: Fetcher> Materializer<F> {
    pub fn new(fetcher: F, options: MaterializeOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Download the album on `page_url` and return its directory.
    ///
    /// Steps run strictly in order and the first failure ends the album.
    /// Nothing touches the filesystem until the page has been decoded and
    /// any cover art fetched; after that, files already written stay on
    /// disk if a later step fails.
    pub async fn materialize(&self, page_url: &str) -> Result<PathBuf, MaterializeError> {
        tracing::info!(url = %page_url, "Fetching album page");
        let html = self.fetch_page(page_url).await?;

        let mut album = extract_album(&html).ok_or_else(|| MaterializeError::AlbumNotFound {
            url: page_url.to_string(),
        })??;

        if self.options.safe_names {
            album.sanitize_names();
        }

        if album.has_free_download() {
            tracing::info!(
                url = %album.free_download_page,
                "This album is free to download in higher quality formats!"
            );
        }

        let year = album.release_year(self.options.year_clock);
        tracing::info!(
            artist = %album.artist,
            album = %album.title,
            year,
            tracks = album.tracks.len(),
            "Downloading"
        );

        let art = match album.art_urls() {
            Some(urls) => Some(CoverArt {
                small: self.fetch_art(&urls.small).await?,
                large: self.fetch_art(&urls.large).await?,
            }),
            None => None,
        };

        let dir = output::album_dir(
            &self.options.output_dir,
            &album.artist,
            &album.folder_name(self.options.year_clock),
        );
        output::ensure_dir(&dir).map_err(|source| MaterializeError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        if let Some(art) = &art {
            output::write_cover(&dir, &art.large).map_err(|source| MaterializeError::WriteCover {
                path: dir.join(output::COVER_FILE_NAME),
                source,
            })?;
        }

        let year = u32::try_from(year).unwrap_or_default();
        let cover = art.as_ref().map(|art| art.small.as_slice());
        for track in &album.tracks {
            self.materialize_track(&album, track, &dir, year, cover).await?;
        }

        tracing::info!(path = %dir.display(), "Album complete");
        Ok(dir)
    }

    async fn materialize_track(
        &self,
        album: &Album,
        track: &Track,
        dir: &Path,
        year: u32,
        cover: Option<&[u8]>,
    ) -> Result<(), MaterializeError> {
        tracing::info!(num = track.track_number, title = %track.title, "Fetching track");
        let body = self
            .fetcher
            .get(&track.audio_url)
            .await
            .map_err(|source| MaterializeError::FetchTrack {
                url: track.audio_url.clone(),
                source,
            })?;

        let path = dir.join(track.file_name());
        output::write_stream(&path, body)
            .await
            .map_err(|source| MaterializeError::WriteTrack {
                path: path.clone(),
                source,
            })?;

        let tags = TrackTags {
            artist: &album.artist,
            album: &album.title,
            title: &track.title,
            year,
            track_number: track.track_number,
            cover,
        };
        tag::write_tags(&path, &tags).map_err(|source| MaterializeError::Tag {
            path: path.clone(),
            source,
        })?;

        tracing::info!(num = track.track_number, path = %path.display(), "✔️ Saved track");
        Ok(())
    }

    /// Fetch a page and return its body as text. Invalid UTF-8 is
    /// replaced rather than rejected, as the HTML parser would do anyway.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<String, MaterializeError> {
        let fetch_failed = |source| MaterializeError::FetchPage {
            url: url.to_string(),
            source,
        };
        let body = self.fetcher.get(url).await.map_err(fetch_failed)?;
        let bytes = body.bytes().await.map_err(fetch_failed)?;
        tracing::debug!(url = %url, bytes = bytes.len(), "Received HTML");

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_art(&self, url: &str) -> Result<Vec<u8>, MaterializeError> {
        tracing::debug!(url = %url, "Fetching album art");
        let body = self
            .fetcher
            .get(url)
            .await
            .map_err(|source| MaterializeError::ArtFetch {
                url: url.to_string(),
                source,
            })?;

        body.bytes().await.map_err(|source| MaterializeError::ArtRead {
            url: url.to_string(),
            source,
        })
    }
}

/// Decode the album JSON from the first `data-tralbum` element of a page.
/// `None` when the page has no such element.
fn extract_album(html: &str) -> Option<Result<Album, bandit_model::DecodeError>> {
    let document = Html::parse_document(html);
    let node = dom::find_with_attr(document.tree.root(), TRALBUM_ATTR)
        .into_iter()
        .next()?;

    Some(bandit_model::decode(&dom::attribute_value(node, TRALBUM_ATTR)))
}
