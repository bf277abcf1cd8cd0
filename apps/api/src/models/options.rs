//! Fixed choice lists offered by the forms. Each renders to the label used in prompts.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    EntryLevel,
    MidLevel,
    SeniorLevel,
    Executive,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::SeniorLevel => "Senior Level",
            ExperienceLevel::Executive => "Executive",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeTemplate {
    #[default]
    Simple,
    Modern,
    Minimal,
}

impl fmt::Display for ResumeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResumeTemplate::Simple => "Simple",
            ResumeTemplate::Modern => "Modern",
            ResumeTemplate::Minimal => "Minimal",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterTone {
    #[default]
    Professional,
    Enthusiastic,
    Confident,
    Creative,
}

impl fmt::Display for LetterTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LetterTone::Professional => "Professional",
            LetterTone::Enthusiastic => "Enthusiastic",
            LetterTone::Confident => "Confident",
            LetterTone::Creative => "Creative",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    #[default]
    General,
    Technical,
    Behavioral,
    CaseStudy,
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InterviewType::General => "General",
            InterviewType::Technical => "Technical",
            InterviewType::Behavioral => "Behavioral",
            InterviewType::CaseStudy => "Case Study",
        })
    }
}
