use clap::Parser;
use nooriq::utils::error::ErrorSeverity;
use nooriq::utils::{logger, validation::Validate};
use nooriq::{
    assess_pronunciation, format_time, next_prayer, prayer_times, AppConfig, CliConfig, Command,
    Coordinate, NoorError, StudyPlanClient, StudyPlanProvider, StudyPlanRequest, KAABA,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => AppConfig::from_env(),
    };

    logger::init_cli_logger(cli.verbose, config.log_level(), config.log_format());

    tracing::info!("Starting nooriq CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if let Err(e) = run(&cli, config).await {
        exit_with(&e);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: AppConfig) -> nooriq::Result<()> {
    match &cli.command {
        Command::Score {
            reference,
            transcript,
        } => {
            let result = assess_pronunciation(reference, transcript);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("🎤 Score: {}% ({})", result.score, result.band.label());
                println!("{}", result.feedback);
            }
        }

        Command::Qibla { lat, lng } => {
            let observer = Coordinate::new(*lat, *lng);
            // 超出範圍仍可計算，只警告
            if let Err(e) = observer.validate() {
                tracing::warn!("⚠️ {}; bearing will be meaningless", e);
            }

            let bearing = observer.qibla_bearing();
            tracing::debug!("Qibla from {} to {}: {}", observer, KAABA, bearing);

            if cli.json {
                let out = json!({ "observer": observer, "bearing": bearing });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("🧭 Qibla Direction: {}° from North", bearing.round());
            }
        }

        Command::PrayerTimes { lat, lng } => {
            let coordinate = match (lat, lng) {
                (Some(lat), Some(lng)) => Coordinate::new(*lat, *lng),
                _ => config.require_location()?,
            };
            coordinate.validate()?;

            let now = chrono::Local::now();
            let times = prayer_times(now.date_naive(), coordinate);
            let next = next_prayer(&times, now.time());

            if cli.json {
                let schedule: Vec<_> = times
                    .iter()
                    .map(|(prayer, time)| json!({ "name": prayer, "time": format_time(time) }))
                    .collect();
                let out = json!({
                    "location": coordinate,
                    "qibla": coordinate.qibla_bearing(),
                    "times": schedule,
                    "next": {
                        "name": next.prayer,
                        "time": next.time,
                        "time_left": next.time_left.to_string(),
                    },
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("🕌 Prayer Times for {}", coordinate);
                for (prayer, time) in times.iter() {
                    println!("  {:<8} {}", prayer.name(), format_time(time));
                }
                println!(
                    "Next Prayer: {} at {} ({})",
                    next.prayer, next.time, next.time_left
                );
                println!(
                    "🧭 Qibla Direction: {}° from North",
                    coordinate.qibla_bearing().round()
                );
            }
        }

        Command::StudyPlan {
            goal,
            timeframe,
            level,
            preferences,
        } => {
            let request = StudyPlanRequest {
                goal: goal.clone(),
                timeframe: timeframe.clone(),
                current_level: level.clone(),
                preferences: preferences.clone(),
            };

            let client = StudyPlanClient::new(config)?;
            let plan = client.study_plan(&request).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", plan.plan);
                print_list("📅 Daily Tasks", &plan.daily_tasks);
                print_list("🏁 Milestones", &plan.milestones);
                print_list("💡 Tips", &plan.tips);
            }
        }
    }

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title);
    for item in items {
        println!("  - {}", item);
    }
}

fn exit_with(e: &NoorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
