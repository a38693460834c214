//! Library data model
//!
//! Shapes exchanged with the recording store and the finished-capture file
//! handed to the upload client.

use serde::{Deserialize, Serialize};

/// One stored recording, as known to the server.
///
/// The server may attach more fields; only these three are meaningful to the
/// client and unknown fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingAsset {
    /// Server-assigned identifier, opaque and unique
    pub id: String,

    /// Display filename, also the suggested download name
    pub filename: String,

    /// Server-relative storage path; playback and download dereference
    /// `{base}/{filepath}`
    pub filepath: String,
}

/// A finished capture, packaged for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFile {
    /// Generated name, `recording-<capture-start-epoch-millis>.webm`
    pub filename: String,

    /// The concatenated encoded chunks
    pub bytes: Vec<u8>,
}

impl RecordingFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Size of the encoded payload in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_decode_ignores_unknown_fields() {
        let json = r#"{
            "id": "abc",
            "filename": "recording-1700000000000.webm",
            "filepath": "uploads/recording-1700000000000.webm",
            "size": 12345,
            "createdAt": "2026-08-29T10:00:00Z"
        }"#;
        let asset: RecordingAsset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.id, "abc");
        assert_eq!(asset.filepath, "uploads/recording-1700000000000.webm");
    }

    #[test]
    fn test_recording_file_len() {
        let file = RecordingFile::new("recording-1.webm", vec![1, 2, 3]);
        assert_eq!(file.len(), 3);
        assert!(!file.is_empty());
    }
}
