//! Career advice chat: quick topics, ask, clear.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{ADVICE_PROMPT_TEMPLATE, ADVICE_SYSTEM};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::Generator;
use crate::models::chat::{ChatExchange, ChatLog};
use crate::session::Session;

/// Preset questions offered as one-click starters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickTopic {
    CareerChange,
    SkillDevelopment,
    SalaryNegotiation,
    JobSearch,
}

impl QuickTopic {
    pub fn question(&self) -> &'static str {
        match self {
            QuickTopic::CareerChange => {
                "I'm thinking about changing careers. What should I consider?"
            }
            QuickTopic::SkillDevelopment => {
                "What skills should I develop to advance in my career?"
            }
            QuickTopic::SalaryNegotiation => "How can I negotiate a better salary?",
            QuickTopic::JobSearch => "What's the best strategy for finding a new job?",
        }
    }
}

/// What the advice screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceView {
    pub history: ChatLog,
    /// Draft question pre-filled from a quick topic.
    pub draft: Option<String>,
}

impl AdviceView {
    pub fn of(session: &Session) -> Self {
        Self {
            history: session.chat.clone(),
            draft: session.quick_topic.clone(),
        }
    }
}

pub fn select_topic(session: &mut Session, topic: QuickTopic) {
    session.quick_topic = Some(topic.question().to_string());
}

/// Asks the coach. On success the exchange is appended and the quick topic cleared;
/// on failure the chat is unchanged.
pub async fn ask_advice<'a>(
    session: &'a mut Session,
    generator: &dyn Generator,
    api_key: Option<&str>,
    question: &str,
) -> Result<&'a ChatExchange, AppError> {
    if question.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a career question".to_string(),
        ));
    }

    let prompt = fill_template(ADVICE_PROMPT_TEMPLATE, &[("question", question)]);
    let advice = generator
        .generate(api_key, &prompt, Some(ADVICE_SYSTEM))
        .await?;

    session.chat.push(question.to_string(), advice);
    session.quick_topic = None;
    info!("Advice exchange #{} recorded", session.chat.len());

    let last = session.chat.len() - 1;
    session
        .chat
        .get(last)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("chat log lost its last exchange")))
}

pub fn clear_chat(session: &mut Session) {
    session.chat.clear();
    session.quick_topic = None;
}
