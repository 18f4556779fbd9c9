//! ID3 tagging of downloaded tracks, through lofty.

use lofty::config::{ParseOptions, WriteOptions};
use lofty::error::LoftyError;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt, TagType};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("could not open track file: {0}")]
    Open(#[source] LoftyError),

    #[error("could not read track file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not save track file: {0}")]
    Save(#[source] LoftyError),
}

/// Tag values written to every track of an album.
#[derive(Debug, Clone)]
pub struct TrackTags<'a> {
    pub artist: &'a str,
    pub album: &'a str,
    pub title: &'a str,
    pub year: u32,
    pub track_number: u32,
    /// JPEG bytes embedded as the front cover.
    pub cover: Option<&'a [u8]>,
}

/// Set the given values on the file at `path`, keeping any tags it
/// already has, and save it in place.
///
/// Content lofty does not recognise as audio (an empty body, an error
/// page) still gets a tag: a bare ID3v2 tag is written in front of the
/// existing bytes.
pub fn write_tags(path: &Path, tags: &TrackTags<'_>) -> Result<(), TagError> {
    let file = File::open(path).map_err(|e| TagError::Open(e.into()))?;
    // Only the tags are touched, so skip reading audio properties.
    let probe = Probe::new(BufReader::new(file))
        .options(ParseOptions::new().read_properties(false))
        .guess_file_type()?;

    if probe.file_type().is_none() {
        let mut content = Vec::new();
        probe.into_inner().read_to_end(&mut content)?;
        return prepend_id3v2(path, tags, &content);
    }

    let mut tagged_file = probe.read().map_err(TagError::Open)?;
    let tag_type = tagged_file.primary_tag_type();
    let mut tag = tagged_file.remove(tag_type).unwrap_or_else(|| Tag::new(tag_type));
    drop(tagged_file);

    apply(&mut tag, tags);
    tag.save_to_path(path, WriteOptions::default())
        .map_err(TagError::Save)?;

    tracing::debug!(path = %path.display(), "Saved tags");
    Ok(())
}

fn prepend_id3v2(path: &Path, tags: &TrackTags<'_>, content: &[u8]) -> Result<(), TagError> {
    let mut tag = Tag::new(TagType::Id3v2);
    apply(&mut tag, tags);

    let mut out = Vec::with_capacity(content.len() + 1024);
    tag.dump_to(&mut out, WriteOptions::default())
        .map_err(TagError::Save)?;
    out.extend_from_slice(content);

    let mut file = File::create(path)?;
    file.write_all(&out)?;

    tracing::debug!(
        path = %path.display(),
        bytes = content.len(),
        "Content is not audio, prepended an ID3v2 tag"
    );
    Ok(())
}

fn apply(tag: &mut Tag, tags: &TrackTags<'_>) {
    tag.set_artist(tags.artist.to_string());
    tag.set_album(tags.album.to_string());
    tag.set_year(tags.year);
    tag.set_title(tags.title.to_string());
    tag.set_track(tags.track_number);

    if let Some(cover) = tags.cover {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Jpeg),
            Some("Front cover".to_string()),
            cover.to_vec(),
        ));
    }
}
