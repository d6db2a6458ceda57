//! Mock business data behind the dashboard screens.
//!
//! Static records (stat cards, OKRs, pipeline, charts, feedback samples, the user manual)
//! plus two session lists that only grow by prepending: the SOP project board and the FAQ book.

use crate::error::InputError;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    /// Change against last month, e.g. `"12%"`.
    pub trend: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objective {
    pub title: &'static str,
    /// 0..=100.
    pub progress: u8,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    Watch,
    AtRisk,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            HealthBand::Healthy
        } else if score > 50 {
            HealthBand::Watch
        } else {
            HealthBand::AtRisk
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merchant {
    pub id: &'static str,
    pub name: &'static str,
    pub industry: &'static str,
    pub stage: &'static str,
    pub health_score: u8,
    pub health: HealthBand,
}

fn merchant(
    id: &'static str,
    name: &'static str,
    industry: &'static str,
    stage: &'static str,
    health_score: u8,
) -> Merchant {
    Merchant {
        id,
        name,
        industry,
        stage,
        health_score,
        health: HealthBand::from_score(health_score),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStage {
    pub title: &'static str,
    pub count: usize,
    pub merchants: Vec<Merchant>,
}

impl PipelineStage {
    fn new(title: &'static str, merchants: Vec<Merchant>) -> Self {
        Self {
            title,
            count: merchants.len(),
            merchants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: f32,
}

/// Headline figures on the dashboard screen.
pub fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard { title: "活跃商户", value: "1,248", trend: "12%" },
        StatCard { title: "平均入驻时间", value: "3.2 天", trend: "15%" },
        StatCard { title: "客户满意度 (CSAT)", value: "4.9/5.0", trend: "0.2" },
        StatCard { title: "日交易量 (USDT)", value: "$4.2M", trend: "8%" },
    ]
}

/// OKR alignment list on the dashboard screen.
pub fn objectives() -> Vec<Objective> {
    vec![
        Objective { title: "降低集成阻力", progress: 75, description: "目标：API 集成时间 < 5 分钟" },
        Objective { title: "知识库覆盖率", progress: 92, description: "目标：前 50 个客户常见问题 100% 覆盖" },
        Objective { title: "跨部门协同", progress: 60, description: "标准化销售与技术之间的交接" },
    ]
}

/// Onboarding kanban, one column per stage.
pub fn onboarding_pipeline() -> Vec<PipelineStage> {
    vec![
        PipelineStage::new(
            "1. 注册与 KYB",
            vec![
                merchant("m1", "全球购有限公司", "跨境电商", "KYB", 90),
                merchant("m2", "艺数藏品坊", "Web3", "KYB", 40),
                merchant("m3", "智云科技", "企业服务", "Reg", 85),
                merchant("m4", "跨境通支付", "金融科技", "Reg", 70),
            ],
        ),
        PipelineStage::new(
            "2. 集成 (沙箱)",
            vec![
                merchant("m5", "链通金融", "Web3", "Sandbox", 60),
                merchant("m6", "亚洲零售集团", "新零售", "Sandbox", 95),
                merchant("m7", "视界流媒体", "数字娱乐", "Sandbox", 88),
            ],
        ),
        PipelineStage::new(
            "3. 测试与验证",
            vec![
                merchant("m8", "优选商城", "跨境电商", "Testing", 30),
                merchant("m9", "安盾保全", "网络安全", "Testing", 92),
            ],
        ),
        PipelineStage::new(
            "4. 正式上线",
            vec![
                merchant("m10", "阿尔法量化", "金融科技", "Live", 100),
                merchant("m11", "元物科技", "Web3", "Live", 98),
                merchant("m12", "云端动力", "企业服务", "Live", 95),
            ],
        ),
    ]
}

/// Average onboarding days per month.
pub fn onboarding_days_by_month() -> Vec<SeriesPoint> {
    [("五月", 5.2), ("六月", 4.8), ("七月", 4.1), ("八月", 3.8), ("九月", 3.5), ("十月", 3.2)]
        .into_iter()
        .map(|(label, value)| SeriesPoint { label, value })
        .collect()
}

/// CSAT score per week.
pub fn csat_by_week() -> Vec<SeriesPoint> {
    [("第一周", 4.5), ("第二周", 4.6), ("第三周", 4.8), ("第四周", 4.9)]
        .into_iter()
        .map(|(label, value)| SeriesPoint { label, value })
        .collect()
}

/// Merchant feedback fed to the improvement report.
pub const FEEDBACK_SAMPLES: [&str; 4] = [
    "费率很有竞争力，但是上传企业文档的入口太难找了，卡了很久。",
    "API 文档写得很棒，开发者友好，集成测试只用了半天。",
    "希望能增加更多本地化的支付方式，目前的选择对东南亚市场不够友好。",
    "客服响应速度很快，但是有些技术问题客服无法直接解决，需要转接技术。",
];

/// All feedback samples as one block of text, space separated.
pub fn combined_feedback() -> String {
    FEEDBACK_SAMPLES.join(" ")
}

/// Operator guide shown on the user-manual screen; rendered like generated text.
pub const USER_MANUAL: &str = "\
# CS Ops Nexus 使用指南

## 仪表板
- **设计意图**：每天开始工作时立即掌握业务健康状况和战略优先级。
- 查看活跃商户、平均入驻时间、CSAT 与日交易量，以及 OKR 对齐进度。

## 团队运营 & SOP
- 输入主题（如“新员工入职指引”），AI 自动起草包含目标、步骤和 KPI 的 SOP。
- 满意后点击 **保存到项目**，草稿会以 20% 进度进入项目看板。

## 商户入驻管道
- 按阶段追踪每一位商户；健康度低于 50 的商户需要优先跟进。

## 知识库 (AI)
- 粘贴商户问题并补充上下文，生成专业回复；可一键 **归档到 FAQ**。

## 分析中心
- 查看入驻时长趋势和 CSAT 分布，一键生成反馈改进报告。

## 典型工作流
1. 在入驻管道发现“艺数藏品坊”卡在 KYB 阶段。
2. 在知识库起草邮件，指导商户补交材料。
3. 意识到这是普遍问题，在团队运营生成《Web3 商户 KYB 快速通关指南》SOP。
4. 下个月在分析中心确认平均入驻时长是否下降。";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: String,
    pub status: String,
    /// 0..=100.
    pub completion: u8,
    pub due: String,
    pub is_new: bool,
}

impl Project {
    fn seeded(title: &str, status: &str, completion: u8, due: &str) -> Self {
        Self {
            title: title.to_string(),
            status: status.to_string(),
            completion,
            due: due.to_string(),
            is_new: false,
        }
    }

    pub fn phase(&self) -> &'static str {
        phase_description(self.completion, &self.status)
    }
}

/// Business phase implied by a project's progress.
pub fn phase_description(completion: u8, status: &str) -> &'static str {
    if status == "计划中" {
        return "待启动";
    }
    match completion {
        100.. => "全员推广与执行",
        80..=99 => "管理层终审 & 签署",
        60..=79 => "跨部门反馈收集",
        30..=59 => "初稿撰写与修订",
        10..=29 => "AI 初稿生成",
        _ => "需求调研",
    }
}

/// SOP projects, newest first.
#[derive(Debug, Clone)]
pub struct ProjectBoard {
    projects: Vec<Project>,
}

impl Default for ProjectBoard {
    fn default() -> Self {
        Self {
            projects: vec![
                Project::seeded("商户入驻流程 v2.0", "审核中", 80, "截止：10月25日"),
                Project::seeded("CS Intercom 回复模板", "已启用", 100, "已完成"),
                Project::seeded("跨部门 API 事故处理协议", "起草中", 30, "截止：11月01日"),
                Project::seeded("季度业务回顾 (QBR) PPT", "计划中", 0, "截止：11月15日"),
            ],
        }
    }
}

impl ProjectBoard {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Files an AI-drafted SOP under `topic` at the top of the board.
    pub fn save_draft(&mut self, topic: &str, today: NaiveDate) -> Result<&Project, InputError> {
        let title = topic.trim();
        if title.is_empty() {
            return Err(InputError::Blank("topic"));
        }
        self.projects.insert(
            0,
            Project {
                title: title.to_string(),
                status: "起草中".to_string(),
                completion: 20,
                due: format!("创建于：{}月{}日", today.month(), today.day()),
                is_new: true,
            },
        );
        Ok(&self.projects[0])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: Option<String>,
    pub category: String,
    pub is_new: bool,
}

/// Category given to replies archived from the drafting assistant.
pub const ARCHIVED_CATEGORY: &str = "AI 归档";

/// FAQ list, newest first.
#[derive(Debug, Clone)]
pub struct FaqBook {
    entries: Vec<FaqEntry>,
}

impl Default for FaqBook {
    fn default() -> Self {
        let seed = [
            ("1", "如何生成 API 密钥？", "技术"),
            ("2", "USDT 提现的手续费是多少？", "计费"),
            ("3", "沙箱环境必须进行 KYB 吗？", "入驻"),
            ("4", "支持的公链列表？", "产品"),
            ("5", "争议退款政策", "政策"),
        ];
        Self {
            entries: seed
                .into_iter()
                .map(|(id, q, cat)| FaqEntry {
                    id: id.to_string(),
                    question: q.to_string(),
                    answer: None,
                    category: cat.to_string(),
                    is_new: false,
                })
                .collect(),
        }
    }
}

impl FaqBook {
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Entries whose question or category contains `term`, ignoring case. Blank matches all.
    pub fn search(&self, term: &str) -> Vec<&FaqEntry> {
        let needle = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.question.to_lowercase().contains(&needle)
                    || e.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Archives a drafted reply as a new FAQ entry at the top.
    pub fn archive(
        &mut self,
        question: &str,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<&FaqEntry, InputError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(InputError::Blank("question"));
        }
        if answer.trim().is_empty() {
            return Err(InputError::Blank("answer"));
        }
        self.entries.insert(
            0,
            FaqEntry {
                id: now.timestamp_millis().to_string(),
                question: question.to_string(),
                answer: Some(answer.to_string()),
                category: ARCHIVED_CATEGORY.to_string(),
                is_new: true,
            },
        );
        Ok(&self.entries[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{render, DisplayBlock};
    use chrono::TimeZone;

    #[test]
    fn pipeline_counts_match_merchants() {
        let stages = onboarding_pipeline();
        assert_eq!(stages.len(), 4);
        assert_eq!(stages.iter().map(|s| s.count).sum::<usize>(), 12);
        for stage in &stages {
            assert_eq!(stage.count, stage.merchants.len());
        }
    }

    #[test]
    fn health_bands() {
        assert_eq!(HealthBand::from_score(81), HealthBand::Healthy);
        assert_eq!(HealthBand::from_score(80), HealthBand::Watch);
        assert_eq!(HealthBand::from_score(51), HealthBand::Watch);
        assert_eq!(HealthBand::from_score(50), HealthBand::AtRisk);
    }

    #[test]
    fn phase_thresholds() {
        assert_eq!(phase_description(0, "计划中"), "待启动");
        assert_eq!(phase_description(100, "计划中"), "待启动");
        assert_eq!(phase_description(100, "已启用"), "全员推广与执行");
        assert_eq!(phase_description(80, "审核中"), "管理层终审 & 签署");
        assert_eq!(phase_description(60, "起草中"), "跨部门反馈收集");
        assert_eq!(phase_description(30, "起草中"), "初稿撰写与修订");
        assert_eq!(phase_description(20, "起草中"), "AI 初稿生成");
        assert_eq!(phase_description(5, "起草中"), "需求调研");
    }

    #[test]
    fn saved_draft_goes_to_top() {
        let mut board = ProjectBoard::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let saved = board.save_draft("  KYB 快速通关指南 ", today).unwrap().clone();
        assert_eq!(saved.title, "KYB 快速通关指南");
        assert_eq!(saved.due, "创建于：10月16日");
        assert_eq!(saved.phase(), "AI 初稿生成");
        assert!(saved.is_new);
        assert_eq!(board.projects().len(), 5);
        assert_eq!(board.projects()[0], saved);
    }

    #[test]
    fn blank_topic_is_rejected() {
        let mut board = ProjectBoard::default();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(board.save_draft("  ", today), Err(InputError::Blank("topic")));
        assert_eq!(board.projects().len(), 4);
    }

    #[test]
    fn faq_search_matches_question_or_category() {
        let book = FaqBook::default();
        assert_eq!(book.search("").len(), 5);
        assert_eq!(book.search("usdt")[0].id, "2");
        assert_eq!(book.search("政策").len(), 1);
        assert!(book.search("不存在").is_empty());
    }

    #[test]
    fn archived_reply_is_searchable_by_category() {
        let mut book = FaqBook::default();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        let entry = book.archive("退款多久到账？", "通常 1-3 个工作日。", now).unwrap();
        assert_eq!(entry.id, now.timestamp_millis().to_string());
        assert_eq!(entry.category, ARCHIVED_CATEGORY);
        assert_eq!(book.search("AI 归档").len(), 1);
        assert_eq!(book.entries()[0].question, "退款多久到账？");
        assert!(book.archive("q", " ", now).is_err());
    }

    #[test]
    fn user_manual_renders_with_headings_and_steps() {
        let blocks = render(USER_MANUAL);
        assert!(matches!(blocks[0], DisplayBlock::Heading { level: 1, .. }));
        assert!(blocks.iter().any(|b| matches!(b, DisplayBlock::OrderedItem { ordinal, .. } if ordinal == "4.")));
    }

    #[test]
    fn combined_feedback_is_space_joined() {
        let text = combined_feedback();
        assert!(text.starts_with(FEEDBACK_SAMPLES[0]));
        assert!(text.contains("只用了半天。 希望"));
        assert!(text.ends_with(FEEDBACK_SAMPLES[3]));
    }
}
