//! Photo loading
//!
//! Profile photos may live in local files, raw bytes, data: URIs, or on a
//! third-party host. Fetching is a trait seam so the shell can supply a
//! network-capable fetcher; the default local fetcher resolves everything
//! except remote URLs. Any failure along the fetch/decode path degrades
//! the photo region to blank; it never aborts the page.

use base64::Engine as _;
use doc_model::PhotoSource;
use image::RgbaImage;

/// Resolves a photo source to encoded image bytes
pub trait PhotoFetcher: Send + Sync {
    fn fetch(&self, source: &PhotoSource) -> Option<Vec<u8>>;
}

/// Fetcher for local sources; remote URLs are reported unavailable
#[derive(Debug, Default)]
pub struct LocalPhotoFetcher;

impl PhotoFetcher for LocalPhotoFetcher {
    fn fetch(&self, source: &PhotoSource) -> Option<Vec<u8>> {
        match source {
            PhotoSource::File { path } => match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "photo file unreadable");
                    None
                }
            },
            PhotoSource::Bytes { data } => Some(data.clone()),
            PhotoSource::DataUri { uri } => decode_data_uri(uri),
            PhotoSource::Remote { url } => {
                tracing::warn!(url, "remote photo not available to the local fetcher");
                None
            }
        }
    }
}

/// Decode the base64 payload of a `data:` URI
fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix("data:")?.split_once(";base64,")?.1;
    match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "data URI payload is not valid base64");
            None
        }
    }
}

/// Fetch and decode a photo to RGBA pixels, degrading to `None` on failure
pub fn load_photo(fetcher: &dyn PhotoFetcher, source: &PhotoSource) -> Option<RgbaImage> {
    let bytes = fetcher.fetch(source)?;
    match image::load_from_memory(&bytes) {
        Ok(decoded) => Some(decoded.to_rgba8()),
        Err(e) => {
            tracing::warn!(error = %e, "photo bytes failed to decode");
            None
        }
    }
}
