const ART_BASE_URL: &str = "https://f4.bcbits.com/img";

/// Thumbnail-sized cover, small enough to embed in every track's tags.
pub fn small_art_url(art_id: u64) -> String {
    format!("{ART_BASE_URL}/a{art_id}_16.jpg")
}

/// Full-size cover, stored next to the tracks as `cover.jpg`.
pub fn large_art_url(art_id: u64) -> String {
    format!("{ART_BASE_URL}/a{art_id}_0.jpg")
}

/// Both cover art URLs for one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtUrls {
    pub small: String,
    pub large: String,
}

impl ArtUrls {
    pub fn for_id(art_id: u64) -> Self {
        Self {
            small: small_art_url(art_id),
            large: large_art_url(art_id),
        }
    }
}
