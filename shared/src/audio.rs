//! Audio references attached to wheel entries
//!
//! The wheel only carries an opaque handle. Playback is left to the front end.

use std::fmt;
use std::sync::Arc;

/// Extensions accepted by the upload dialog
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "ogg", "m4a", "aac"];

/// MIME type used when nothing better is known
pub const FALLBACK_MIME: &str = "audio/mpeg";

/// Title used when an upload arrives without any file name
pub const UNTITLED: &str = "Untitled";

/// Uploaded audio bytes plus what is needed to play them back
#[derive(Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub file_name: String,
    pub mime: String,
    /// Shared so cloning an entry for display never copies the payload
    pub bytes: Arc<[u8]>,
}

impl AudioClip {
    /// Build a clip from an upload, inferring the MIME type from the extension
    ///
    /// Falls back to the uploader's declared type, then to `audio/mpeg`.
    pub fn from_upload(file_name: &str, bytes: Vec<u8>, declared_mime: Option<&str>) -> Self {
        let mime = extension_of(file_name)
            .and_then(mime_for_extension)
            .or(declared_mime.filter(|m| !m.trim().is_empty()))
            .unwrap_or(FALLBACK_MIME)
            .to_string();

        Self {
            file_name: file_name.to_string(),
            mime,
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Opaque reference to playable audio content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRef {
    /// Bytes uploaded during this session
    Clip(AudioClip),
    /// Remote stream or file URL
    Url(String),
}

impl AudioRef {
    /// File name of an uploaded clip, if this reference carries one
    pub fn file_name(&self) -> Option<&str> {
        match self {
            AudioRef::Clip(clip) => Some(clip.file_name.as_str()),
            AudioRef::Url(_) => None,
        }
    }
}

/// MIME type for a known audio extension (case-insensitive)
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        _ => None,
    }
}

/// Whether an upload with this file name is accepted
pub fn is_supported_file(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Derive an entry title from a file name by stripping the last extension
///
/// A missing name becomes [`UNTITLED`]. A name that is only an extension,
/// such as `.mp3`, has no title and yields `None`.
pub fn title_from_file_name(file_name: &str) -> Option<String> {
    let name = file_name.trim();
    if name.is_empty() {
        return Some(UNTITLED.to_string());
    }
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    };
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}

fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("mp3"), Some("audio/mpeg"));
        assert_eq!(mime_for_extension("M4A"), Some("audio/mp4"));
        assert_eq!(mime_for_extension("flac"), None);
    }

    #[test]
    fn test_clip_mime_fallbacks() {
        let clip = AudioClip::from_upload("intro.ogg", vec![1, 2, 3], Some("audio/x-custom"));
        assert_eq!(clip.mime, "audio/ogg");

        let clip = AudioClip::from_upload("intro.flac", vec![], Some("audio/flac"));
        assert_eq!(clip.mime, "audio/flac");

        let clip = AudioClip::from_upload("intro", vec![], None);
        assert_eq!(clip.mime, FALLBACK_MIME);
    }

    #[test]
    fn test_title_from_file_name() {
        assert_eq!(title_from_file_name("Robot Dance.mp3").as_deref(), Some("Robot Dance"));
        assert_eq!(title_from_file_name("v1.2.final.wav").as_deref(), Some("v1.2.final"));
        assert_eq!(title_from_file_name("no_extension").as_deref(), Some("no_extension"));
        assert_eq!(title_from_file_name("").as_deref(), Some(UNTITLED));
        assert_eq!(title_from_file_name(".mp3"), None);
        assert_eq!(title_from_file_name(" .wav"), None);
    }

    #[test]
    fn test_supported_files() {
        assert!(is_supported_file("a.MP3"));
        assert!(is_supported_file("b.aac"));
        assert!(!is_supported_file("c.flac"));
        assert!(!is_supported_file("readme"));
    }
}
