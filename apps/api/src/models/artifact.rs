use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of long-form text kept in a single overwritable slot per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Resume,
    CoverLetter,
}

impl ArtifactKind {
    /// Name used in export filenames and reaction counters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Resume => "resume",
            ArtifactKind::CoverLetter => "cover_letter",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// One slot per artifact kind. Regeneration overwrites, clearing empties.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtifactSlots {
    pub resume: Option<GeneratedArtifact>,
    pub cover_letter: Option<GeneratedArtifact>,
}

impl ArtifactSlots {
    pub fn get(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.slot(kind).as_ref()
    }

    pub fn store(&mut self, kind: ArtifactKind, text: String) -> &GeneratedArtifact {
        self.slot_mut(kind).insert(GeneratedArtifact {
            kind,
            text,
            generated_at: Utc::now(),
        })
    }

    /// Empties the slot. Returns whether anything was there.
    pub fn clear(&mut self, kind: ArtifactKind) -> bool {
        self.slot_mut(kind).take().is_some()
    }

    fn slot(&self, kind: ArtifactKind) -> &Option<GeneratedArtifact> {
        match kind {
            ArtifactKind::Resume => &self.resume,
            ArtifactKind::CoverLetter => &self.cover_letter,
        }
    }

    fn slot_mut(&mut self, kind: ArtifactKind) -> &mut Option<GeneratedArtifact> {
        match kind {
            ArtifactKind::Resume => &mut self.resume,
            ArtifactKind::CoverLetter => &mut self.cover_letter,
        }
    }
}
