use chrono::{DateTime, Datelike, Local, Utc};

use crate::art::ArtUrls;
use crate::sanitize::sanitize;

/// An album as described by a storefront page's embedded data.
///
/// Only the names are ever rewritten after decoding, and that happens
/// before any output path is derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub artist: String,
    pub title: String,
    /// Cover art identifier. `0` means the album has no art.
    pub art_id: u64,
    /// Storefront classification ("album", "track", ...), passed through.
    pub item_type: String,
    /// Link to a higher quality free download, empty if none is offered.
    pub free_download_page: String,
    pub release_date: DateTime<Utc>,
    /// Tracks in album order. Never resorted by track number.
    pub tracks: Vec<Track>,
}

/// One track of an [`Album`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    /// 1-based position. Neither uniqueness nor contiguity is checked.
    pub track_number: u32,
    /// Direct URL of the 128 kbps MP3 stream. May be empty.
    pub audio_url: String,
}

/// Which clock the release year is read on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearClock {
    #[default]
    Local,
    Utc,
}

impl Album {
    /// Rewrite artist, album title and every track title with
    /// [`sanitize`]. URLs are left alone.
    pub fn sanitize_names(&mut self) {
        self.artist = sanitize(&self.artist);
        self.title = sanitize(&self.title);
        for track in &mut self.tracks {
            track.title = sanitize(&track.title);
        }
    }

    /// Cover art URLs, or `None` when the album has no art.
    pub fn art_urls(&self) -> Option<ArtUrls> {
        (self.art_id != 0).then(|| ArtUrls::for_id(self.art_id))
    }

    pub fn has_free_download(&self) -> bool {
        !self.free_download_page.is_empty()
    }

    pub fn release_year(&self, clock: YearClock) -> i32 {
        match clock {
            YearClock::Local => self.release_date.with_timezone(&Local).year(),
            YearClock::Utc => self.release_date.year(),
        }
    }

    /// Directory name below the artist folder, e.g. `Album Title (2020)`.
    pub fn folder_name(&self, clock: YearClock) -> String {
        format!("{} ({:04})", self.title, self.release_year(clock))
    }
}

impl Track {
    /// Output file name, e.g. `01 Intro.mp3`.
    pub fn file_name(&self) -> String {
        format!("{:02} {}.mp3", self.track_number, self.title)
    }
}
