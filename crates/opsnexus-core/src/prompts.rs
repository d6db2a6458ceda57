//! Instruction templates for the three generation actions.
//!
//! Every template asks for Markdown in Simplified Chinese so the output fits the
//! renderer's subset (headings, bullets, numbered steps, bold).

/// Company the assistant speaks for.
pub const COMPANY: &str = "StablePay";

/// SOP draft for `topic`.
pub fn procedure_document(topic: &str) -> String {
    format!(
        "You are the Chief Customer Officer's assistant at {company}, a Web3 stablecoin payment gateway.\n\
         Write a structured Standard Operating Procedure (SOP) for: \"{topic}\".\n\
         \n\
         Output language: Simplified Chinese (简体中文). Format: Markdown.\n\
         Sections:\n\
         1. Objective (目标)\n\
         2. Key Stakeholders (关键利益相关者)\n\
         3. Prerequisites (前置条件)\n\
         4. Step-by-Step Process as bullet points (详细步骤)\n\
         5. Success Metrics / KPIs (成功指标)\n\
         \n\
         Be professional and concise; focus on efficiency and compliance.",
        company = COMPANY,
        topic = topic.trim(),
    )
}

/// Merchant-facing reply to `query`, grounded in optional `context`.
pub fn support_reply(query: &str, context: &str) -> String {
    let context = context.trim();
    let background = if context.is_empty() { "(none)" } else { context };
    format!(
        "You are a Customer Success agent for {company}.\n\
         Merchant query: \"{query}\"\n\
         Background: {background}\n\
         \n\
         Draft a polite, professional and technically accurate reply to the merchant in \
         Simplified Chinese (简体中文), formatted as Markdown. Where relevant, highlight \
         \"API-First\" (API优先) and \"5-minute integration\" (5分钟集成).",
        company = COMPANY,
        query = query.trim(),
        background = background,
    )
}

/// Sentiment read-out plus three improvements for `feedback`.
pub fn feedback_summary(feedback: &str) -> String {
    format!(
        "Analyze the sentiment of the following merchant feedback and suggest 3 actionable improvements.\n\
         Feedback: \"{feedback}\"\n\
         \n\
         Output language: Simplified Chinese (简体中文). Format: Markdown.",
        feedback = feedback.trim(),
    )
}
