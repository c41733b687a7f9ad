use crate::domain::model::{StudyPlan, StudyPlanRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn ai_endpoint(&self) -> &str;
    fn ai_model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
    fn referer(&self) -> &str;
    fn app_title(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// 產生學習計畫的來源（AI 服務或測試替身）
#[async_trait]
pub trait StudyPlanProvider: Send + Sync {
    async fn study_plan(&self, request: &StudyPlanRequest) -> Result<StudyPlan>;
}
