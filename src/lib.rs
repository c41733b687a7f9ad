pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::AppConfig;

pub use crate::core::{
    prayer_times::{format_time, next_prayer, prayer_times},
    qibla::{qibla_bearing, KAABA},
    similarity::{assess_pronunciation, levenshtein_distance, similarity, similarity_score},
    study_plan::{extract_section, parse_study_plan, StudyPlanClient},
};
pub use crate::domain::model::{
    Coordinate, NextPrayer, Prayer, PrayerTimes, PronunciationAssessment, ScoreBand,
    SimilarityScore, StudyPlan, StudyPlanRequest, TimeLeft,
};
pub use crate::domain::ports::{ConfigProvider, StudyPlanProvider};
pub use crate::utils::error::{NoorError, Result};
