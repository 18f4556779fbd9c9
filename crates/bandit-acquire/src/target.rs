use thiserror::Error;
use url::Url;

/// What a command-line URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single album page, `/album/...`.
    Album(Url),
    /// A storefront's music listing, `/music`.
    Storefront(Url),
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid URL {input}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("not an album or storefront URL: {0}")]
    Unsupported(String),
}

/// Classify a URL given on the command line. A bare storefront root is
/// taken to mean its `/music` listing.
pub fn classify(input: &str) -> Result<Target, TargetError> {
    let mut url = Url::parse(input).map_err(|source| TargetError::InvalidUrl {
        input: input.to_string(),
        source,
    })?;

    if matches!(url.path(), "" | "/") {
        url.set_path("/music");
    }

    match url.path() {
        "/music" | "/music/" => Ok(Target::Storefront(url)),
        path if path.starts_with(crate::storefront::ALBUM_PATH_PREFIX) => Ok(Target::Album(url)),
        _ => Err(TargetError::Unsupported(input.to_string())),
    }
}
