//! Resume generation: validate form → fill template → LLM → resume slot.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::Generator;
use crate::models::artifact::{ArtifactKind, ArtifactSlots, GeneratedArtifact};
use crate::models::options::ResumeTemplate;

/// Resume form. Only name and email are required; the rest is passed through as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub education: String,
    pub skills: String,
    pub certifications: String,
    pub experience: String,
    pub target_job: String,
    pub template: ResumeTemplate,
}

impl ResumeForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in required fields (Name and Email)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates a resume and stores it in the session's resume slot,
/// replacing any earlier one. On failure the slot is untouched.
pub async fn generate_resume<'a>(
    artifacts: &'a mut ArtifactSlots,
    generator: &dyn Generator,
    api_key: Option<&str>,
    form: &ResumeForm,
) -> Result<&'a GeneratedArtifact, AppError> {
    form.validate()?;

    let prompt = build_resume_prompt(form);
    let text = generator
        .generate(api_key, &prompt, Some(RESUME_SYSTEM))
        .await?;

    info!("Resume generated ({} chars)", text.len());
    Ok(artifacts.store(ArtifactKind::Resume, text))
}

pub fn build_resume_prompt(form: &ResumeForm) -> String {
    let template = form.template.to_string();
    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("phone", form.phone.as_str()),
            ("address", form.address.as_str()),
            ("linkedin", form.linkedin.as_str()),
            ("education", form.education.as_str()),
            ("skills", form.skills.as_str()),
            ("experience", form.experience.as_str()),
            ("certifications", form.certifications.as_str()),
            ("target_job", form.target_job.as_str()),
            ("template", template.as_str()),
        ],
    )
}
