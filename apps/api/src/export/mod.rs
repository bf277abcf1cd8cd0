// Export adapters: PDF documents and spoken audio built from generated text,
// plus the timestamped download names and the lookup of what can be exported.

pub mod handlers;
pub mod pdf;
pub mod speech;

use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::artifact::ArtifactKind;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the content is empty")]
    EmptyContent,

    #[error("PDF generation error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TTS generation error: {0}")]
    Speech(String),

    #[error("TTS request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A piece of session content that can be downloaded or read aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSource {
    Artifact(ArtifactKind),
    /// Answer of the chat exchange at this index.
    Chat(usize),
    InterviewFeedback,
    InterviewSummary,
    InterviewQuestion,
}

impl FromStr for ExportSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resume" => Ok(ExportSource::Artifact(ArtifactKind::Resume)),
            "cover_letter" => Ok(ExportSource::Artifact(ArtifactKind::CoverLetter)),
            "interview_feedback" => Ok(ExportSource::InterviewFeedback),
            "interview_summary" => Ok(ExportSource::InterviewSummary),
            "interview_question" => Ok(ExportSource::InterviewQuestion),
            other => other
                .strip_prefix("chat_")
                .and_then(|i| i.parse::<usize>().ok())
                .map(ExportSource::Chat)
                .ok_or_else(|| AppError::NotFound(format!("Unknown content kind '{other}'"))),
        }
    }
}

impl ExportSource {
    /// Name used in filenames and reaction counters.
    pub fn name(&self) -> String {
        match self {
            ExportSource::Artifact(kind) => kind.as_str().to_string(),
            ExportSource::Chat(i) => format!("chat_{i}"),
            ExportSource::InterviewFeedback => "interview_feedback".to_string(),
            ExportSource::InterviewSummary => "interview_summary".to_string(),
            ExportSource::InterviewQuestion => "interview_question".to_string(),
        }
    }

    /// Pulls the text for this source out of the session.
    pub fn resolve(&self, session: &Session) -> Result<String, AppError> {
        let text = match self {
            ExportSource::Artifact(kind) => session.artifacts.get(*kind).map(|a| a.text.clone()),
            ExportSource::Chat(i) => session.chat.get(*i).map(|e| e.answer.clone()),
            ExportSource::InterviewFeedback => {
                session.interview.report().map(|r| r.feedback.clone())
            }
            ExportSource::InterviewSummary => {
                session.interview.report().map(|r| r.transcript.clone())
            }
            ExportSource::InterviewQuestion => {
                session.interview.current_question().map(str::to_string)
            }
        };

        text.ok_or_else(|| AppError::NotFound(format!("No {} content available", self.name())))
    }
}

pub fn pdf_filename<Tz: TimeZone>(kind: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{kind}_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}

pub fn audio_filename<Tz: TimeZone>(kind: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{kind}_audio_{}.mp3", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_filenames_carry_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(pdf_filename("resume", &at), "resume_20240309_140507.pdf");
        assert_eq!(
            audio_filename("interview_feedback", &at),
            "interview_feedback_audio_20240309_140507.mp3"
        );
    }

    #[test]
    fn test_source_names_round_trip() {
        for name in [
            "resume",
            "cover_letter",
            "chat_3",
            "interview_feedback",
            "interview_summary",
            "interview_question",
        ] {
            let source: ExportSource = name.parse().unwrap();
            assert_eq!(source.name(), name);
        }
        assert!("chat_x".parse::<ExportSource>().is_err());
        assert!("avatar".parse::<ExportSource>().is_err());
    }

    #[test]
    fn test_resolve_reports_missing_content() {
        let mut session = Session::new();
        let err = ExportSource::Artifact(ArtifactKind::Resume)
            .resolve(&session)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        session.chat.push("How?".to_string(), "Like this.".to_string());
        assert_eq!(
            ExportSource::Chat(0).resolve(&session).unwrap(),
            "Like this."
        );
        assert!(ExportSource::Chat(1).resolve(&session).is_err());
    }
}
