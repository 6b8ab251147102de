use serde::{Deserialize, Serialize};

/// Audio held entirely in memory.
///
/// Uploaded WAV files and synthesized speech both travel as byte buffers;
/// nothing is staged through named files on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioClip {
    /// Raw audio bytes (RIFF/WAV container).
    pub bytes: Vec<u8>,
    /// MIME type for playback, e.g. "audio/wav".
    pub mime_type: String,
}

impl AudioClip {
    /// Create a WAV clip from raw bytes.
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "audio/wav".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Outcome of a one-shot recognition request.
///
/// `NoMatch` covers both "the service heard nothing it could transcribe"
/// and transport-level failures, which the flow collapses after logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recognition {
    Recognized { text: String },
    NoMatch,
}

impl Recognition {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Recognition::Recognized { .. })
    }
}

/// One entry from the synthesis voice catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    /// Full voice identifier, e.g. "fr-FR-HenriNeural".
    pub name: String,
    /// Locale the voice speaks, e.g. "fr-FR".
    pub locale: String,
    /// Human-readable display name.
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_clip() {
        let clip = AudioClip::wav(vec![1, 2, 3]);
        assert_eq!(clip.len(), 3);
        assert!(!clip.is_empty());
        assert_eq!(clip.mime_type, "audio/wav");
    }

    #[test]
    fn test_recognition_variants() {
        let hit = Recognition::Recognized {
            text: "hello".to_string(),
        };
        assert!(hit.is_recognized());
        assert!(!Recognition::NoMatch.is_recognized());
    }

    #[test]
    fn test_recognition_serializes_with_status_tag() {
        let json = serde_json::to_string(&Recognition::Recognized {
            text: "salut".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"status\":\"recognized\""));
        assert!(json.contains("\"text\":\"salut\""));
    }
}
