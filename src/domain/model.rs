use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};

/// 發音分數，範圍 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimilarityScore(u8);

impl SimilarityScore {
    pub const MAX: SimilarityScore = SimilarityScore(100);

    /// Converts a similarity ratio in [0, 1] to a rounded percentage.
    pub fn from_ratio(ratio: f64) -> Self {
        let pct = (ratio * 100.0).round().clamp(0.0, 100.0);
        SimilarityScore(pct as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> ScoreBand {
        ScoreBand::from_score(self)
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    KeepPracticing,
    Challenging,
}

impl ScoreBand {
    pub fn from_score(score: SimilarityScore) -> Self {
        match score.value() {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::KeepPracticing,
            _ => ScoreBand::Challenging,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::KeepPracticing => "keep practicing",
            ScoreBand::Challenging => "challenging",
        }
    }

    pub fn feedback(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent pronunciation! Your Tajweed is very good.",
            ScoreBand::Good => {
                "Good effort! Try to focus on clearer pronunciation of each letter."
            }
            ScoreBand::KeepPracticing => {
                "Keep practicing! Listen to the reference audio and try to match the pronunciation."
            }
            ScoreBand::Challenging => {
                "This is challenging - don't give up! Consider practicing with shorter phrases first."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationAssessment {
    pub transcript: String,
    pub score: SimilarityScore,
    pub band: ScoreBand,
    pub feedback: &'static str,
}

/// 經緯度座標（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Validate for Coordinate {
    fn validate(&self) -> Result<()> {
        validate_range("latitude", self.latitude, -90.0, 90.0)?;
        validate_range("longitude", self.longitude, -180.0, 180.0)?;
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// 依時間順序列出
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, NaiveTime)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeLeft {
    Today { hours: u32, minutes: u32 },
    Tomorrow,
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLeft::Today { hours, minutes } if *hours > 0 => {
                write!(f, "{}h {}m", hours, minutes)
            }
            TimeLeft::Today { minutes, .. } => write!(f, "{}m", minutes),
            TimeLeft::Tomorrow => f.write_str("Tomorrow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub time: String,
    pub time_left: TimeLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanRequest {
    pub goal: String,
    pub timeframe: String,
    pub current_level: String,
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub plan: String,
    pub daily_tasks: Vec<String>,
    pub milestones: Vec<String>,
    pub tips: Vec<String>,
}
