//! Service metadata used to build upload requests

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// A transcription model offered by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub loaded: bool,
}

/// Response of `GET /models`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelList {
    pub fn contains(&self, value: &str) -> bool {
        self.models.iter().any(|m| m.value == value)
    }
}

/// A language the backend can transcribe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
}

/// Response of `GET /languages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageList {
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// Response of `GET /upload-limits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    pub max_size_mb: u64,
    pub max_size_bytes: u64,
    #[serde(default)]
    pub supported_formats: Vec<String>,
    #[serde(default)]
    pub max_concurrent_jobs: Option<u32>,
}

impl UploadLimits {
    /// Client-side check of a file before it is uploaded
    ///
    /// Mirrors the backend's size limit and the advertised formats. An empty
    /// format list accepts every extension.
    pub fn check(&self, path: &Path, size: u64) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max_mb: self.max_size_mb,
            });
        }

        if self.supported_formats.is_empty() {
            return Ok(());
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_uppercase)
            .unwrap_or_default();

        if self
            .supported_formats
            .iter()
            .any(|format| format.eq_ignore_ascii_case(&extension))
        {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFormat {
                extension,
                supported: self.supported_formats.join(", "),
            })
        }
    }
}

/// Response of `GET /api-docs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocs {
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<EndpointDoc>,
}

/// One documented endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDoc {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub parameters: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> UploadLimits {
        serde_json::from_str(
            r#"{"max_size_mb": 1, "max_size_bytes": 1048576,
                "supported_formats": ["MP3", "WAV", "M4A", "FLAC", "OGG"],
                "max_concurrent_jobs": 3}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_accepts_supported_file() {
        assert!(limits().check(Path::new("talk.mp3"), 1024).is_ok());
        assert!(limits().check(Path::new("talk.FLAC"), 1024).is_ok());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = limits().check(Path::new("talk.wav"), 2 * 1048576).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { max_mb: 1, .. }));
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let err = limits().check(Path::new("notes.txt"), 10).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFormat { .. }));

        let err = limits().check(Path::new("noext"), 10).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_rejects_empty_file() {
        assert_eq!(
            limits().check(Path::new("a.mp3"), 0),
            Err(ValidationError::EmptyFile)
        );
    }

    #[test]
    fn test_model_list() {
        let list: ModelList = serde_json::from_str(
            r#"{"models": [{"value": "tiny", "label": "Fast", "loaded": true},
                           {"value": "small", "label": "Accurate", "loaded": false}]}"#,
        )
        .unwrap();
        assert!(list.contains("small"));
        assert!(!list.contains("large"));
    }
}
