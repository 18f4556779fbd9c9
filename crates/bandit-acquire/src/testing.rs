//! In-memory stand-ins for the network and sample audio used by tests.

use crate::fetch::{FetchError, Fetcher, ResponseBody};
use lofty::config::ParseOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Tag;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Mutex;

/// Serves canned bodies by URL and records every request in order.
/// Unknown URLs fail like an unreachable host.
#[derive(Debug, Default)]
pub(crate) struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    broken_bodies: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), body.into());
        self
    }

    /// `url` answers, but its body breaks before any data arrives.
    pub(crate) fn with_broken_body(mut self, url: &str) -> Self {
        self.broken_bodies.insert(url.to_string());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    type Body = MockBody;

    async fn get(&self, url: &str) -> Result<MockBody, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if self.broken_bodies.contains(url) {
            return Ok(MockBody::failing_after(url, Vec::new()));
        }
        match self.responses.get(url) {
            Some(body) => Ok(MockBody::chunked(url, body.chunks(1024).map(<[u8]>::to_vec).collect())),
            None => Err(FetchError::Unavailable { url: url.to_string() }),
        }
    }
}

#[derive(Debug)]
pub(crate) struct MockBody {
    url: String,
    chunks: VecDeque<Vec<u8>>,
    fail_at_end: bool,
}

impl MockBody {
    pub(crate) fn chunked(url: &str, chunks: Vec<Vec<u8>>) -> Self {
        Self { url: url.to_string(), chunks: chunks.into(), fail_at_end: false }
    }

    /// Yields `chunks`, then errors instead of ending, as if the
    /// connection to `url` dropped.
    pub(crate) fn failing_after(url: &str, chunks: Vec<Vec<u8>>) -> Self {
        Self { url: url.to_string(), chunks: chunks.into(), fail_at_end: true }
    }
}

impl ResponseBody for MockBody {
    async fn chunk(&mut self) -> Result<Option<Vec<u8>>, FetchError> {
        match self.chunks.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None if self.fail_at_end => Err(FetchError::Unavailable { url: self.url.clone() }),
            None => Ok(None),
        }
    }
}

/// A short run of silent MPEG-1 Layer III frames (128 kbps, 44.1 kHz),
/// enough for lofty to recognise the data as MP3.
pub(crate) fn silent_mp3() -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
    // 144 * 128000 / 44100, no padding
    const FRAME_LEN: usize = 417;
    const FRAMES: usize = 16;

    let mut data = Vec::with_capacity(FRAME_LEN * FRAMES);
    for _ in 0..FRAMES {
        data.extend_from_slice(&HEADER);
        data.resize(data.len() + FRAME_LEN - HEADER.len(), 0);
    }
    data
}

/// The primary tag of the audio file at `path`.
pub(crate) fn read_tag(path: &Path) -> Tag {
    let mut tagged_file = Probe::open(path)
        .unwrap()
        .options(ParseOptions::new().read_properties(false))
        .read()
        .unwrap();
    let tag_type = tagged_file.primary_tag_type();
    tagged_file.remove(tag_type).expect("file has a primary tag")
}

/// Every file below `root`, relative to it, sorted.
pub(crate) fn files_under(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
