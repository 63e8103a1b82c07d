//! Classification of uploaded media by declared content type and extension.

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "webm", "mkv", "flv"];

/// Check whether a declared content type describes a video.
pub fn is_video_content_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("video/")
}

fn extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Check if the file extension is one of the video containers we expect to see.
pub fn is_supported_video_format(filename: &str) -> bool {
    extension(filename)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Upper-cased extension used as a display label, e.g. "MP4".
pub fn format_label(filename: &str) -> String {
    extension(filename)
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

/// Content type inferred from the filename, for logging against the declared one.
pub fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_content_type() {
        assert!(is_video_content_type("video/mp4"));
        assert!(is_video_content_type("Video/QuickTime"));
        assert!(is_video_content_type(" video/webm"));
        assert!(!is_video_content_type("audio/mpeg"));
        assert!(!is_video_content_type("application/octet-stream"));
        assert!(!is_video_content_type(""));
        assert!(!is_video_content_type("text/video"));
    }

    #[test]
    fn test_is_supported_video_format() {
        assert!(is_supported_video_format("clip.mp4"));
        assert!(is_supported_video_format("clip.MOV"));
        assert!(is_supported_video_format("clip.mkv"));
        assert!(!is_supported_video_format("clip.mp3"));
        assert!(!is_supported_video_format("clip"));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("clip.mp4"), "MP4");
        assert_eq!(format_label("archive.tar.gz"), "GZ");
        assert_eq!(format_label("noext"), "UNKNOWN");
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("clip.mp4"), "video/mp4");
        assert_eq!(guess_content_type("noext"), "application/octet-stream");
    }
}
