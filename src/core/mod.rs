pub mod prayer_times;
pub mod qibla;
pub mod similarity;
pub mod study_plan;
