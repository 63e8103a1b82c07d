use crate::{AppError, AppState, Result};
use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

use crate::media;
use crate::models::{format_megabytes, FileInfo, ProjectStatus, TranscribeResponse};
use crate::storage::{self, ProjectDir, DEFAULT_FILENAME};
use crate::transcription::TranscriptionRequest;

const FILE_FIELD: &str = "file";

pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>> {
    tracing::info!("Received transcription upload");

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read form field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        if field.file_name().is_none() && name != FILE_FIELD {
            tracing::debug!("Skipping non-file field: {}", name);
            continue;
        }

        let filename = declared_filename(field.file_name());

        let content_type = match field.content_type() {
            Some(ct) if media::is_video_content_type(ct) => ct.to_string(),
            Some(ct) => {
                return Err(AppError::Validation(format!(
                    "Unsupported media type '{}': please upload a video file",
                    ct
                )));
            }
            None => {
                return Err(AppError::Validation(
                    "Missing media type: please upload a video file".to_string(),
                ));
            }
        };

        if !media::is_supported_video_format(&filename) {
            tracing::warn!(
                "Accepting {} declared as {} (extension suggests {})",
                filename,
                content_type,
                media::guess_content_type(&filename)
            );
        }

        let project = storage::create_project(&state.config.upload_root()).await?;

        // Dropping `project` without persisting removes the directory, so an
        // error or a cancelled request leaves nothing behind.
        let response = ingest(&state, &project, field, filename, content_type).await?;
        project.persist();

        tracing::info!(
            "Project {} completed ({} bytes)",
            response.project_id,
            response.file_info.size_bytes
        );
        return Ok(Json(response));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// Filename reported in the record: the declared one unless it is blank.
fn declared_filename(declared: Option<&str>) -> String {
    declared
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}

async fn ingest(
    state: &AppState,
    project: &ProjectDir,
    mut field: Field<'_>,
    filename: String,
    content_type: String,
) -> Result<TranscribeResponse> {
    let started = Instant::now();
    let max_size = state.config.max_upload_size_bytes();

    let mut source = project
        .open_source(&storage::stored_file_name(&filename))
        .await?;

    while let Some(chunk) = field.chunk().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read uploaded file: {}", e))
    })? {
        if source.written().saturating_add(chunk.len() as u64) > max_size {
            return Err(AppError::FileTooLarge(state.config.max_upload_size_mb));
        }
        source.write_chunk(&chunk).await?;
    }

    let source_path = source.path.clone();
    let size_bytes = source.finish().await?;

    let result = state
        .transcriber
        .transcribe(TranscriptionRequest {
            project_id: project.id.clone(),
            source_path,
            filename: filename.clone(),
        })
        .await?;

    project.write_record(&result.record).await?;

    let elapsed = started.elapsed();
    Ok(TranscribeResponse {
        project_id: project.id.clone(),
        status: ProjectStatus::Completed,
        processing_time: format!("{:.1}s", elapsed.as_secs_f64()),
        processing_time_ms: elapsed.as_millis() as u64,
        file_info: FileInfo {
            format: media::format_label(&filename),
            filename,
            size_bytes,
            estimated_size: format_megabytes(size_bytes),
            estimated_duration: result.record.duration.clone(),
            mime_type: content_type,
        },
        transcription: result.record,
        ai_analysis: result.analysis,
        next_steps: result.next_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_filename_is_kept_verbatim() {
        assert_eq!(declared_filename(Some("clip.mp4")), "clip.mp4");
        assert_eq!(declared_filename(Some(" clip.mp4")), " clip.mp4");
        assert_eq!(declared_filename(Some("my clip .mov ")), "my clip .mov ");
    }

    #[test]
    fn test_declared_filename_defaults_when_blank() {
        assert_eq!(declared_filename(None), DEFAULT_FILENAME);
        assert_eq!(declared_filename(Some("")), DEFAULT_FILENAME);
        assert_eq!(declared_filename(Some("   ")), DEFAULT_FILENAME);
    }
}
