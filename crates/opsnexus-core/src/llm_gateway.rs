//! LLM gateway seam: one prompt in, text or a typed failure out.
//!
//! The three dashboard actions are provided methods on [`LlmGateway`]; implementors only
//! supply [`LlmGateway::generate`]. Callers decide what to show on failure through
//! [`Action::display_text`].

use crate::error::{GenerationError, GenerationResult};
use crate::prompts;
use serde::{Deserialize, Serialize};

/// Text generation backend.
#[async_trait::async_trait]
pub trait LlmGateway: Send + Sync {
    /// Sends `prompt` to the model and returns its text.
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;

    /// Drafts an SOP document for `topic`.
    async fn draft_procedure_document(&self, topic: &str) -> GenerationResult<String> {
        let result = self.generate(&prompts::procedure_document(topic)).await;
        Action::ProcedureDocument.attribute(result)
    }

    /// Drafts a merchant reply for `query`; `context` may be empty.
    async fn draft_support_reply(&self, query: &str, context: &str) -> GenerationResult<String> {
        let result = self.generate(&prompts::support_reply(query, context)).await;
        Action::SupportReply.attribute(result)
    }

    /// Summarizes feedback into a sentiment and improvement report.
    async fn summarize_feedback(&self, feedback_text: &str) -> GenerationResult<String> {
        let result = self.generate(&prompts::feedback_summary(feedback_text)).await;
        Action::FeedbackSummary.attribute(result)
    }
}

/// The three generation buttons on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ProcedureDocument,
    SupportReply,
    FeedbackSummary,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::ProcedureDocument,
        Action::SupportReply,
        Action::FeedbackSummary,
    ];

    /// Stable index, used for per-action bookkeeping.
    pub fn index(self) -> usize {
        match self {
            Action::ProcedureDocument => 0,
            Action::SupportReply => 1,
            Action::FeedbackSummary => 2,
        }
    }

    /// Operator-facing text when no credential is configured.
    pub fn not_configured_message(self) -> &'static str {
        match self {
            Action::ProcedureDocument => {
                "⚠️ 系统未配置 API Key，无法生成内容。请在环境变量中设置 API_KEY。"
            }
            Action::SupportReply | Action::FeedbackSummary => "⚠️ 系统未配置 API Key。",
        }
    }

    /// Operator-facing text when the call failed.
    pub fn failed_message(self) -> &'static str {
        match self {
            Action::ProcedureDocument => "内容生成出错。请检查 API 配额或网络连接。",
            Action::SupportReply => "生成回复时出错。",
            Action::FeedbackSummary => "情感分析时出错。",
        }
    }

    /// Failure reason logged when the model answers with no text.
    pub fn empty_output_message(self) -> &'static str {
        match self {
            Action::ProcedureDocument => "生成 SOP 失败。",
            Action::SupportReply => "生成回复失败。",
            Action::FeedbackSummary => "分析失败。",
        }
    }

    /// Replaces a generic empty-output failure with this action's own reason.
    fn attribute(self, result: GenerationResult<String>) -> GenerationResult<String> {
        match result {
            Err(e) if e.is_empty_output() => {
                let reason = self.empty_output_message();
                tracing::warn!(action = %self, "{}", reason);
                Err(GenerationError::failed(reason))
            }
            other => other,
        }
    }

    /// Text that is always safe to display: the model output or the matching fallback.
    pub fn display_text(self, result: &GenerationResult<String>) -> String {
        match result {
            Ok(text) => text.clone(),
            Err(GenerationError::ConfigurationMissing) => self.not_configured_message().to_string(),
            Err(GenerationError::GenerationFailed { .. }) => self.failed_message().to_string(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::ProcedureDocument => "procedure_document",
            Action::SupportReply => "support_reply",
            Action::FeedbackSummary => "feedback_summary",
        };
        f.write_str(name)
    }
}
