//! The `data-tralbum` blob embedded in storefront album pages.
//!
//! Decoding is deliberately two-step: serde maps the JSON onto plain wire
//! structs, then [`decode`] converts them into an [`Album`], parsing the
//! release date explicitly on the way.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::album::{Album, Track};
use crate::release_date::{self, ReleaseDateError};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed album JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("album JSON has no album_release_date")]
    MissingReleaseDate,

    #[error("unrecognised album_release_date {value:?}: {source}")]
    ReleaseDate {
        value: String,
        #[source]
        source: ReleaseDateError,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TralbumJson {
    #[serde(default, deserialize_with = "null_as_default")]
    artist: String,
    #[serde(default, deserialize_with = "null_as_default")]
    current: CurrentJson,
    #[serde(default, deserialize_with = "null_as_default")]
    item_type: String,
    #[serde(rename = "freeDownloadPage", default, deserialize_with = "null_as_default")]
    free_download_page: String,
    #[serde(default)]
    album_release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    trackinfo: Vec<TrackInfoJson>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CurrentJson {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    art_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrackInfoJson {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    track_num: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    file: FileJson,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileJson {
    #[serde(rename = "mp3-128", default, deserialize_with = "null_as_default")]
    mp3_128: String,
}

/// The storefront emits `null` for missing strings and numbers; treat it
/// the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the JSON text of a `data-tralbum` attribute.
///
/// Unknown keys are ignored. Fails if the JSON is malformed, a field has
/// the wrong type, or `album_release_date` is missing or not in the
/// `DD Mon YYYY HH:MM:SS GMT` layout.
pub fn decode(json: &str) -> Result<Album, DecodeError> {
    let raw: TralbumJson = serde_json::from_str(json)?;

    let value = raw.album_release_date.ok_or(DecodeError::MissingReleaseDate)?;
    let release_date = release_date::parse(&value)
        .map_err(|source| DecodeError::ReleaseDate { value, source })?;

    let tracks = raw
        .trackinfo
        .into_iter()
        .map(|t| Track {
            title: t.title,
            track_number: t.track_num,
            audio_url: t.file.mp3_128,
        })
        .collect();

    Ok(Album {
        artist: raw.artist,
        title: raw.current.title,
        art_id: raw.current.art_id,
        item_type: raw.item_type,
        free_download_page: raw.free_download_page,
        release_date,
        tracks,
    })
}

/// Encode an album back into the `data-tralbum` JSON shape.
///
/// `decode(&encode(album))` reproduces the album as long as its release
/// date falls on a whole second.
pub fn encode(album: &Album) -> String {
    let raw = TralbumJson {
        artist: album.artist.clone(),
        current: CurrentJson {
            title: album.title.clone(),
            art_id: album.art_id,
        },
        item_type: album.item_type.clone(),
        free_download_page: album.free_download_page.clone(),
        album_release_date: Some(release_date::format(&album.release_date)),
        trackinfo: album
            .tracks
            .iter()
            .map(|t| TrackInfoJson {
                title: t.title.clone(),
                track_num: t.track_number,
                file: FileJson {
                    mp3_128: t.audio_url.clone(),
                },
            })
            .collect(),
    };
    // Plain structs of strings and integers always serialize.
    serde_json::to_string(&raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SAMPLE: &str = r#"{
        "artist": "A",
        "current": {"title": "T", "art_id": 0, "release_date": "ignored"},
        "album_release_date": "01 Jan 2020 00:00:00 GMT",
        "trackinfo": [
            {"title": "One", "track_num": 1, "file": {"mp3-128": "http://x/1.mp3"}, "duration": 61.2}
        ],
        "packages": []
    }"#;

    #[test]
    fn test_decode_minimal_page_data() {
        let album = decode(SAMPLE).unwrap();

        assert_eq!(album.artist, "A");
        assert_eq!(album.title, "T");
        assert_eq!(album.art_id, 0);
        assert_eq!(album.item_type, "");
        assert_eq!(album.free_download_page, "");
        assert_eq!(album.release_date, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            album.tracks,
            vec![Track {
                title: "One".into(),
                track_number: 1,
                audio_url: "http://x/1.mp3".into(),
            }]
        );
    }

    #[test]
    fn test_decode_full_page_data() {
        let json = r#"{
            "artist": "Boards of Canada",
            "current": {"title": "Tomorrow's Harvest", "art_id": 3497268394},
            "item_type": "album",
            "freeDownloadPage": "https://boc.bandcamp.com/download?id=1",
            "album_release_date": "05 Jun 2013 00:00:00 GMT",
            "trackinfo": [
                {"title": "Reach for the Dead", "track_num": 2, "file": {"mp3-128": "https://t4/2"}},
                {"title": "Gemini", "track_num": 1, "file": {"mp3-128": "https://t4/1"}}
            ]
        }"#;
        let album = decode(json).unwrap();

        assert_eq!(album.art_id, 3497268394);
        assert_eq!(album.item_type, "album");
        assert_eq!(album.free_download_page, "https://boc.bandcamp.com/download?id=1");
        let numbers: Vec<u32> = album.tracks.iter().map(|t| t.track_number).collect();
        assert_eq!(numbers, vec![2, 1]);
    }

    #[test]
    fn test_decode_nulls_as_empty() {
        let json = r#"{
            "artist": "A",
            "current": {"title": "T", "art_id": null},
            "freeDownloadPage": null,
            "album_release_date": "01 Jan 2020 00:00:00 GMT",
            "trackinfo": [{"title": "Hidden", "track_num": null, "file": null}]
        }"#;
        let album = decode(json).unwrap();

        assert_eq!(album.art_id, 0);
        assert!(!album.has_free_download());
        assert_eq!(album.tracks[0].track_number, 0);
        assert_eq!(album.tracks[0].audio_url, "");
    }

    #[test]
    fn test_decode_rejects_bad_release_date() {
        let json = SAMPLE.replace("01 Jan 2020 00:00:00 GMT", "2020-01-01");
        match decode(&json) {
            Err(DecodeError::ReleaseDate { value, .. }) => assert_eq!(value, "2020-01-01"),
            other => panic!("expected ReleaseDate error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_unpadded_release_date() {
        let json = SAMPLE.replace("01 Jan 2020 00:00:00 GMT", "1 Jan 2020 0:0:0 GMT");
        match decode(&json) {
            Err(DecodeError::ReleaseDate {
                source: ReleaseDateError::NotCanonical { .. },
                ..
            }) => {}
            other => panic!("expected NotCanonical release date, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_missing_release_date() {
        let json = r#"{"artist": "A", "current": {"title": "T"}, "trackinfo": []}"#;
        assert!(matches!(decode(json), Err(DecodeError::MissingReleaseDate)));

        let json = r#"{"artist": "A", "album_release_date": null}"#;
        assert!(matches!(decode(json), Err(DecodeError::MissingReleaseDate)));
    }

    #[test]
    fn test_decode_structural_errors() {
        assert!(matches!(decode("{not json"), Err(DecodeError::Json(_))));
        assert!(matches!(decode(""), Err(DecodeError::Json(_))));

        let wrong_type = SAMPLE.replace(r#""track_num": 1"#, r#""track_num": "one""#);
        assert!(matches!(decode(&wrong_type), Err(DecodeError::Json(_))));

        let date_not_string = SAMPLE.replace(r#""01 Jan 2020 00:00:00 GMT""#, "1577836800");
        assert!(matches!(decode(&date_not_string), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_encode_then_decode_reproduces_album() {
        let album = Album {
            artist: "Múm".into(),
            title: "Finally We Are No One".into(),
            art_id: 12,
            item_type: "album".into(),
            free_download_page: String::new(),
            release_date: Utc.with_ymd_and_hms(2002, 5, 20, 8, 30, 15).unwrap(),
            tracks: vec![
                Track { title: "Sleep/Swim".into(), track_number: 1, audio_url: "https://t4/1".into() },
                Track { title: "Green Grass of Tunnel".into(), track_number: 2, audio_url: String::new() },
            ],
        };

        assert_eq!(decode(&encode(&album)).unwrap(), album);
    }

    #[test]
    fn test_encode_loses_subsecond_precision() {
        let mut album = decode(SAMPLE).unwrap();
        album.release_date += chrono::Duration::milliseconds(500);

        let decoded = decode(&encode(&album)).unwrap();
        assert_ne!(decoded, album);
        assert_eq!(decoded.release_date, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }
}
