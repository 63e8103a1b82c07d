use serde::{Deserialize, Serialize};

/// Result of processing an uploaded file, persisted as `transcription.json`
/// next to the source file and echoed back in the API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    pub text: String,
    /// Duration formatted as `m:ss`
    pub duration: String,
    pub language: String,
    pub confidence: f32,
    /// Filename as declared by the uploader (or the default name)
    pub filename: String,

    // Content analysis consumed by the web client
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default, rename = "socialPosts")]
    pub social_posts: SocialPosts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: u32,
    pub name: String,
    pub segments: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialPosts {
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub content_type: String,
    pub engagement_score: f32,
    pub viral_potential: String,
    pub recommended_platforms: Vec<String>,
    pub best_posting_times: Vec<String>,
}

/// Everything a transcriber hands back for one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcription {
    pub record: TranscriptionRecord,
    pub analysis: AiAnalysis,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub size_bytes: u64,
    pub estimated_size: String,
    pub estimated_duration: String,
    pub format: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub project_id: String,
    pub transcription: TranscriptionRecord,
    pub status: ProjectStatus,
    /// Human readable, e.g. "2.3s"
    pub processing_time: String,
    pub processing_time_ms: u64,
    pub file_info: FileInfo,
    pub ai_analysis: AiAnalysis,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub debug: bool,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

/// Format a byte count as megabytes with one decimal, e.g. "45.2 MB".
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_record_field_names() {
        let record = TranscriptionRecord {
            text: "hello".into(),
            duration: "0:42".into(),
            language: "en".into(),
            confidence: 0.5,
            filename: "clip.mp4".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "text",
            "duration",
            "language",
            "confidence",
            "filename",
            "speakers",
            "keywords",
            "summary",
            "sentiment",
            "topics",
            "socialPosts",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert!(obj["socialPosts"].get("linkedin").is_some());
    }

    #[test]
    fn test_minimal_record_deserializes() {
        let json = r#"{"text":"t","duration":"0:01","language":"en","confidence":1.0,"filename":"a.mp4"}"#;
        let record: TranscriptionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.filename, "a.mp4");
        assert!(record.speakers.is_empty());
        assert_eq!(record.social_posts, SocialPosts::default());
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.0 MB");
        assert_eq!(format_megabytes(47_395_635), "45.2 MB");
    }
}
