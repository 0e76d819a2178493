//! Extraction modes and their fixed argument profiles

/// Watch-page URL template; interpolating the media identifier here is the
/// only permitted source-address construction.
const WATCH_URL_TEMPLATE: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical source address for a media identifier.
pub fn watch_url(media_id: &str) -> String {
    format!("{}{}", WATCH_URL_TEMPLATE, media_id)
}

/// Output mode of an extraction process
///
/// Each mode maps to one immutable tool argument profile, one content type
/// and, for the download-oriented modes, one fixed attachment filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Best available audio track, forwarded unchanged
    PassthroughAudio,
    /// Best audio re-encoded to MP3
    TranscodeAudio,
    /// Best video+audio merged into an MP4 container, forwarded unchanged
    PassthroughVideo,
}

impl ExtractionMode {
    /// Tool argument profile for this mode. `url` is the watch-page address;
    /// output always goes to stdout (`-o -`).
    pub fn args(&self, url: &str) -> Vec<String> {
        let args: &[&str] = match self {
            Self::PassthroughAudio => &["-f", "bestaudio", "-o", "-"],
            Self::TranscodeAudio => &[
                "-f",
                "bestaudio",
                "--extract-audio",
                "--audio-format",
                "mp3",
                "-o",
                "-",
            ],
            Self::PassthroughVideo => &[
                "-f",
                "bestvideo[ext=mp4]+bestaudio[ext=m4a]/mp4",
                "-o",
                "-",
            ],
        };

        args.iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(url.to_string()))
            .collect()
    }

    /// Content type of the emitted byte stream
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::PassthroughAudio | Self::TranscodeAudio => "audio/mpeg",
            Self::PassthroughVideo => "video/mp4",
        }
    }

    /// Attachment header value for download-oriented modes; the plain
    /// stream mode has none.
    pub fn content_disposition(&self) -> Option<&'static str> {
        match self {
            Self::PassthroughAudio => None,
            Self::TranscodeAudio => Some("attachment; filename=\"audio.mp3\""),
            Self::PassthroughVideo => Some("attachment; filename=\"video.mp4\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url_substitution() {
        assert_eq!(watch_url("abc123"), "https://www.youtube.com/watch?v=abc123");
        // The identifier is opaque: no escaping, no reformatting
        assert_eq!(
            watch_url("x-_Y9z"),
            "https://www.youtube.com/watch?v=x-_Y9z"
        );
    }

    #[test]
    fn test_passthrough_audio_args() {
        let args = ExtractionMode::PassthroughAudio.args("URL");
        assert_eq!(args, ["-f", "bestaudio", "-o", "-", "URL"]);
    }

    #[test]
    fn test_transcode_audio_args() {
        let args = ExtractionMode::TranscodeAudio.args("URL");
        assert_eq!(
            args,
            ["-f", "bestaudio", "--extract-audio", "--audio-format", "mp3", "-o", "-", "URL"]
        );
    }

    #[test]
    fn test_passthrough_video_args() {
        let args = ExtractionMode::PassthroughVideo.args("URL");
        assert_eq!(
            args,
            ["-f", "bestvideo[ext=mp4]+bestaudio[ext=m4a]/mp4", "-o", "-", "URL"]
        );
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ExtractionMode::PassthroughAudio.content_type(), "audio/mpeg");
        assert_eq!(ExtractionMode::TranscodeAudio.content_type(), "audio/mpeg");
        assert_eq!(ExtractionMode::PassthroughVideo.content_type(), "video/mp4");
    }

    #[test]
    fn test_content_disposition() {
        assert!(ExtractionMode::PassthroughAudio.content_disposition().is_none());
        assert_eq!(
            ExtractionMode::TranscodeAudio.content_disposition(),
            Some("attachment; filename=\"audio.mp3\"")
        );
        assert_eq!(
            ExtractionMode::PassthroughVideo.content_disposition(),
            Some("attachment; filename=\"video.mp4\"")
        );
    }
}
