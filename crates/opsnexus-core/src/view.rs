//! View router: which of the six dashboard screens is showing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard screens, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Dashboard,
    TeamOps,
    Onboarding,
    KnowledgeBase,
    Analytics,
    UserManual,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::TeamOps,
        View::Onboarding,
        View::KnowledgeBase,
        View::Analytics,
        View::UserManual,
    ];

    /// Wire id, e.g. `TEAM_OPS`.
    pub fn id(self) -> &'static str {
        match self {
            View::Dashboard => "DASHBOARD",
            View::TeamOps => "TEAM_OPS",
            View::Onboarding => "ONBOARDING",
            View::KnowledgeBase => "KNOWLEDGE_BASE",
            View::Analytics => "ANALYTICS",
            View::UserManual => "USER_MANUAL",
        }
    }

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "仪表板",
            View::TeamOps => "团队运营 & SOP",
            View::Onboarding => "商户入驻管道",
            View::KnowledgeBase => "知识库 (AI)",
            View::Analytics => "分析中心",
            View::UserManual => "使用指南",
        }
    }

    /// Sidebar group heading.
    pub fn section(self) -> &'static str {
        match self {
            View::Dashboard => "概览",
            View::TeamOps | View::Onboarding => "运营",
            View::KnowledgeBase | View::Analytics => "支持与数据",
            View::UserManual => "系统",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view '{}'", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        View::ALL
            .into_iter()
            .find(|v| v.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Holds the current view. Starts on [`View::Dashboard`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn set_view(&mut self, view: View) {
        if view != self.current {
            tracing::debug!(from = %self.current, to = %view, "view switched");
        }
        self.current = view;
    }
}
