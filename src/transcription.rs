//! Transcription backends.
//!
//! The handler hands a persisted source file to a [`Transcriber`] and stores
//! whatever record comes back. Only the mock backend exists for now.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::{AiAnalysis, SocialPosts, Speaker, Transcription, TranscriptionRecord};
use crate::Result;

#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub project_id: String,
    /// Path of the fully written source file
    pub source_path: PathBuf,
    /// Filename reported back in the record
    pub filename: String,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription>;
}

const MOCK_LANGUAGE: &str = "fr";
const MOCK_CONFIDENCE: f32 = 0.96;
const MOCK_DURATION_SECS: u64 = 150;

/// Format a duration in seconds as `m:ss`.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mock_text(filename: &str) -> String {
    format!(
        "Ceci est une transcription IA générée pour le fichier \"{}\".\n\n\
         L'intelligence artificielle a analysé le contenu audio et vidéo pour produire cette transcription de haute qualité.\n\
         Le système peut détecter plusieurs langues, identifier les locuteurs, et extraire les informations clés du contenu.\n\n\
         Cette technologie permet de transformer automatiquement n'importe quel contenu vidéo en:\n\
         - Transcriptions précises\n\
         - Résumés intelligents\n\
         - Posts pour réseaux sociaux\n\
         - Articles de blog\n\
         - Clips vidéo optimisés",
        filename
    )
}

fn mock_record(filename: String) -> TranscriptionRecord {
    TranscriptionRecord {
        text: mock_text(&filename),
        duration: format_duration(MOCK_DURATION_SECS),
        language: MOCK_LANGUAGE.to_string(),
        confidence: MOCK_CONFIDENCE,
        filename,
        speakers: vec![
            Speaker {
                id: 1,
                name: "Locuteur 1".to_string(),
                segments: 12,
            },
            Speaker {
                id: 2,
                name: "Locuteur 2".to_string(),
                segments: 8,
            },
        ],
        keywords: strings(&[
            "intelligence artificielle",
            "transcription",
            "contenu",
            "technologie",
        ]),
        summary: "Discussion sur les technologies de transcription et de création de contenu automatisée."
            .to_string(),
        sentiment: "positive".to_string(),
        topics: strings(&["Technologie", "IA", "Contenu numérique", "Innovation"]),
        social_posts: SocialPosts {
            twitter: "L'IA transforme vos vidéos en contenu engageant automatiquement. #IA #Content"
                .to_string(),
            linkedin: "L'intelligence artificielle génère automatiquement transcriptions, résumés et posts à partir de n'importe quelle vidéo."
                .to_string(),
            facebook: "Transformez vos vidéos en contenu pour tous vos réseaux sociaux grâce à l'IA."
                .to_string(),
        },
    }
}

fn mock_analysis() -> AiAnalysis {
    AiAnalysis {
        content_type: "educational".to_string(),
        engagement_score: 8.7,
        viral_potential: "high".to_string(),
        recommended_platforms: strings(&["YouTube", "LinkedIn", "TikTok"]),
        best_posting_times: strings(&["9:00 AM", "1:00 PM", "7:00 PM"]),
    }
}

fn mock_next_steps() -> Vec<String> {
    strings(&[
        "Générer des clips courts",
        "Créer des visuels pour les réseaux sociaux",
        "Optimiser pour le SEO",
        "Programmer la publication",
    ])
}

/// Returns a fixed placeholder result, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct MockTranscriber {
    delay: Duration,
}

impl MockTranscriber {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcription> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!(
            "Mock transcription for project {} ({:?})",
            request.project_id,
            request.source_path
        );

        Ok(Transcription {
            record: mock_record(request.filename),
            analysis: mock_analysis(),
            next_steps: mock_next_steps(),
        })
    }
}
