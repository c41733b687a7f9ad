use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "nooriq")]
#[command(about = "Quran study companion: tajweed scoring, qibla, prayer times and AI study plans")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Score a spoken transcript against a reference transliteration
    Score {
        #[arg(long)]
        reference: String,
        #[arg(long)]
        transcript: String,
    },

    /// Bearing from an observer toward the Kaaba
    Qibla {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Today's (placeholder) prayer schedule and the next prayer
    PrayerTimes {
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,
    },

    /// Ask the AI service for a personalised study plan
    StudyPlan {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        timeframe: String,
        #[arg(long)]
        level: String,
        #[arg(long)]
        preferences: Option<String>,
    },
}
