use crate::domain::model::{StudyPlan, StudyPlanRequest};
use crate::domain::ports::{ConfigProvider, StudyPlanProvider};
use crate::utils::error::{NoorError, Result};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an Islamic scholar and educational expert specializing in Quran study plans. Create personalized, practical study plans that respect Islamic traditions and accommodate different learning styles and schedules.

Your response should be structured and actionable, focusing on:
- Realistic daily goals
- Progressive difficulty
- Spiritual reflection components
- Memorization techniques
- Review schedules

Always provide encouragement and remind users of the spiritual benefits of Quran study.";

const DAILY_TASK_LIMIT: usize = 5;
const MILESTONE_LIMIT: usize = 4;
const TIP_LIMIT: usize = 6;

pub fn user_prompt(request: &StudyPlanRequest) -> String {
    format!(
        "Create a personalized Quran study plan with the following details:
- Goal: {}
- Timeframe: {}
- Current Level: {}
- Additional Preferences: {}

Please provide:
1. An overall study plan description
2. Daily tasks breakdown
3. Weekly milestones
4. Helpful tips for success

Format your response as a structured plan that's easy to follow.",
        request.goal,
        request.timeframe,
        request.current_level,
        request
            .preferences
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("None specified")
    )
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

pub struct StudyPlanClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> StudyPlanClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self { config, client })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NoorError::ConfigError {
                message: "OpenRouter API key is not configured. Please set OPENROUTER_API_KEY or ai.api_key.".to_string(),
            })
    }

    async fn complete(&self, request: &StudyPlanRequest) -> Result<String> {
        let api_key = self.api_key()?;
        let prompt = user_prompt(request);

        let body = ChatRequest {
            model: self.config.ai_model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.config.temperature(),
            max_tokens: self.config.max_tokens(),
        };

        tracing::debug!(
            "Requesting study plan from {} (model: {})",
            self.config.ai_endpoint(),
            self.config.ai_model()
        );

        let response = self
            .client
            .post(self.config.ai_endpoint())
            .bearer_auth(api_key)
            .header("HTTP-Referer", self.config.referer())
            .header("X-Title", self.config.app_title())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("AI service response status: {}", status);

        if !status.is_success() {
            // 錯誤 body 可能不是 JSON
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_default();

            return Err(NoorError::ApiStatusError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                detail,
            });
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|_| NoorError::InvalidResponseError)?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or(NoorError::InvalidResponseError)
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> StudyPlanProvider for StudyPlanClient<C> {
    async fn study_plan(&self, request: &StudyPlanRequest) -> Result<StudyPlan> {
        if request.goal.trim().is_empty() {
            return Err(NoorError::ValidationError {
                message: "goal cannot be empty".to_string(),
            });
        }

        match self.complete(request).await {
            Ok(content) => {
                let plan = parse_study_plan(&content);
                tracing::info!(
                    "📚 Study plan received: {} daily tasks, {} milestones, {} tips",
                    plan.daily_tasks.len(),
                    plan.milestones.len(),
                    plan.tips.len()
                );
                Ok(plan)
            }
            Err(e) => {
                tracing::error!("❌ AI study plan request failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Splits the AI reply into non-blank lines and pulls out the three sections.
pub fn parse_study_plan(content: &str) -> StudyPlan {
    let lines: Vec<&str> = content.split('\n').filter(|l| !l.trim().is_empty()).collect();

    StudyPlan {
        plan: content.to_string(),
        daily_tasks: extract_section(&lines, "daily", DAILY_TASK_LIMIT),
        milestones: extract_section(&lines, "milestone", MILESTONE_LIMIT),
        tips: extract_section(&lines, "tip", TIP_LIMIT),
    }
}

fn numbered_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.").expect("valid regex"))
}

fn item_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-•\d.\s]+").expect("valid regex"))
}

fn is_item(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•') || numbered_item().is_match(line)
}

/// Line heuristic for list sections.
///
/// Any line mentioning `keyword`, "daily" or "tip" opens a section (and is not
/// itself an item). Bulleted or numbered lines inside a section become items;
/// the first plain line after at least one item ends collection.
pub fn extract_section(lines: &[&str], keyword: &str, max_items: usize) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in lines {
        let lower = line.to_lowercase();

        if lower.contains(keyword) || lower.contains("daily") || lower.contains("tip") {
            in_section = true;
            continue;
        }

        if !in_section || line.trim().is_empty() {
            continue;
        }

        if is_item(line) {
            items.push(item_prefix().replace(line, "").trim().to_string());
            if items.len() >= max_items {
                break;
            }
        } else if !items.is_empty() {
            break;
        }
    }

    items.truncate(max_items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Here is your personalized plan.

Daily Tasks:
- Read one page with translation
- Memorize 3 new ayat
• Review yesterday's portion
4. Listen to a reciter for 10 minutes

Weekly Milestones:
1. Complete Surah Al-Mulk
2. Recite the week's portion from memory
Keep going!

Tips for Success:
- Study after Fajr
- Be consistent
";

    #[test]
    fn test_extract_daily_tasks() {
        let plan = parse_study_plan(SAMPLE);
        assert_eq!(
            plan.daily_tasks,
            vec![
                "Read one page with translation",
                "Memorize 3 new ayat",
                "Review yesterday's portion",
                "Listen to a reciter for 10 minutes",
            ]
        );
    }

    #[test]
    fn test_extract_milestones_stops_at_plain_line() {
        let plan = parse_study_plan(SAMPLE);
        // "Daily Tasks" 也會開啟區段
        assert_eq!(plan.milestones[0], "Read one page with translation");
        assert_eq!(plan.milestones.len(), 4);
    }

    #[test]
    fn test_extract_respects_max_items() {
        let lines = vec!["Tips:", "- a", "- b", "- c", "- d"];
        assert_eq!(extract_section(&lines, "tip", 2), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_without_heading_is_empty() {
        let lines = vec!["- orphan bullet", "1. another"];
        assert!(extract_section(&lines, "milestone", 4).is_empty());
    }

    #[test]
    fn test_numbered_prefix_is_stripped() {
        let lines = vec!["Milestones", "12. Finish Juz 30", "- - nested dash"];
        assert_eq!(
            extract_section(&lines, "milestone", 4),
            vec!["Finish Juz 30", "nested dash"]
        );
    }

    #[test]
    fn test_user_prompt_defaults_preferences() {
        let request = StudyPlanRequest {
            goal: "Memorize Juz Amma".to_string(),
            timeframe: "3 months".to_string(),
            current_level: "beginner".to_string(),
            preferences: None,
        };
        let prompt = user_prompt(&request);
        assert!(prompt.contains("- Goal: Memorize Juz Amma"));
        assert!(prompt.contains("- Additional Preferences: None specified"));
    }
}
