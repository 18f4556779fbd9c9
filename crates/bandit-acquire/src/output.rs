use crate::fetch::ResponseBody;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const COVER_FILE_NAME: &str = "cover.jpg";

/// Album directory for the given names: `{output_dir}/{artist}/{folder}`,
/// where `folder` is the `Title (Year)` name.
pub fn album_dir(output_dir: &Path, artist: &str, folder: &str) -> PathBuf {
    output_dir.join(artist).join(folder)
}

/// Create `dir` and any missing parents, unless it already exists.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        tracing::debug!(path = %dir.display(), "Created album directory");
    }
    Ok(())
}

/// Write the full-size cover art as `cover.jpg` in the album directory.
pub fn write_cover(dir: &Path, art: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(COVER_FILE_NAME);
    let mut file = File::create(&path)?;
    file.write_all(art)?;
    tracing::info!(path = %path.display(), bytes = art.len(), "Wrote cover art");
    Ok(path)
}

/// Stream a response body into a new file at `path`.
///
/// The file handle is closed before returning, on success and on error.
/// Returns the number of bytes written.
pub async fn write_stream<B: ResponseBody>(path: &Path, mut body: B) -> io::Result<u64> {
    let mut file = File::create(path)?;
    let mut written = 0u64;
    while let Some(chunk) = body.chunk().await.map_err(io::Error::other)? {
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    file.flush()?;
    tracing::debug!(path = %path.display(), bytes = written, "Wrote track");
    Ok(written)
}
