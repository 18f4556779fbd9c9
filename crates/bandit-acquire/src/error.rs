use crate::fetch::FetchError;
use crate::tag::TagError;
use bandit_model::DecodeError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why an album could not be written. Every variant ends the album; files
/// written before the failure are left in place.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("could not fetch {url}: {source}")]
    FetchPage {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("could not find album data on {url}")]
    AlbumNotFound { url: String },

    #[error("could not parse album JSON: {0}")]
    Decode(#[from] DecodeError),

    #[error("could not fetch album art {url}: {source}")]
    ArtFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("could not read album art {url}: {source}")]
    ArtRead {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("could not create album directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write album art {}: {source}", path.display())]
    WriteCover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not fetch track {url}: {source}")]
    FetchTrack {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("could not write track file {}: {source}", path.display())]
    WriteTrack {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not tag {}: {source}", path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: TagError,
    },
}
