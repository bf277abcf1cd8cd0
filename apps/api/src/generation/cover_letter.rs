//! Cover letter generation.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::llm_client::prompts::{fill_template, or_placeholder};
use crate::llm_client::Generator;
use crate::models::artifact::{ArtifactKind, ArtifactSlots, GeneratedArtifact};
use crate::models::options::{ExperienceLevel, LetterTone};

/// Salutation used when no hiring manager is named.
pub const DEFAULT_HIRING_MANAGER: &str = "Hiring Manager";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoverLetterForm {
    pub name: String,
    pub company: String,
    pub position: String,
    pub hiring_manager: Option<String>,
    pub experience_level: ExperienceLevel,
    pub tone: LetterTone,
    pub job_description: String,
    pub background: String,
    pub why_company: String,
}

impl CoverLetterForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [&self.name, &self.company, &self.position];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::Validation(
                "Please fill in required fields (Name, Company, Position)".to_string(),
            ));
        }
        Ok(())
    }
}

pub async fn generate_cover_letter<'a>(
    artifacts: &'a mut ArtifactSlots,
    generator: &dyn Generator,
    api_key: Option<&str>,
    form: &CoverLetterForm,
) -> Result<&'a GeneratedArtifact, AppError> {
    form.validate()?;

    let prompt = build_cover_letter_prompt(form);
    let text = generator
        .generate(api_key, &prompt, Some(COVER_LETTER_SYSTEM))
        .await?;

    info!(
        "Cover letter generated for {} at {} ({} chars)",
        form.position,
        form.company,
        text.len()
    );
    Ok(artifacts.store(ArtifactKind::CoverLetter, text))
}

pub fn build_cover_letter_prompt(form: &CoverLetterForm) -> String {
    let experience_level = form.experience_level.to_string();
    let tone = form.tone.to_string();
    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("name", form.name.as_str()),
            ("position", form.position.as_str()),
            ("company", form.company.as_str()),
            (
                "hiring_manager",
                or_placeholder(form.hiring_manager.as_deref(), DEFAULT_HIRING_MANAGER),
            ),
            ("experience_level", experience_level.as_str()),
            ("tone", tone.as_str()),
            ("job_description", form.job_description.as_str()),
            ("background", form.background.as_str()),
            ("why_company", form.why_company.as_str()),
        ],
    )
}
