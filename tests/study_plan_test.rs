use anyhow::Result;
use httpmock::prelude::*;
use nooriq::config::toml_config::AiConfig;
use nooriq::{AppConfig, NoorError, StudyPlanClient, StudyPlanProvider, StudyPlanRequest};

fn config_for(server: &MockServer, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        ai: AiConfig {
            endpoint: server.url("/api/v1/chat/completions"),
            api_key: api_key.map(str::to_string),
            timeout_seconds: 5,
            ..AiConfig::default()
        },
        location: None,
        logging: None,
    }
}

fn request() -> StudyPlanRequest {
    StudyPlanRequest {
        goal: "Memorize Juz Amma".to_string(),
        timeframe: "3 months".to_string(),
        current_level: "beginner".to_string(),
        preferences: Some("mornings only".to_string()),
    }
}

const PLAN_CONTENT: &str = "Overview: a gentle three month plan.\n\nDaily Tasks:\n- Memorize 5 ayat after Fajr\n- Review the previous day's portion\n\nWeekly Milestones:\n1. Finish Surah An-Naba\n2. Recite Surah An-Nazi'at from memory\nStay sincere.\n";

/// 成功回應：驗證 header、body 與解析結果
#[tokio::test]
async fn test_study_plan_success() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/chat/completions")
            .header("Authorization", "Bearer sk-test")
            .header("X-Title", "NoorIQ - Smart Quran Companion")
            .header("HTTP-Referer", "https://nooriq.app")
            .body_contains("\"model\":\"openai/gpt-4o\"")
            .body_contains("\"max_tokens\":1500")
            .body_contains("Additional Preferences: mornings only");
        then.status(200).json_body(serde_json::json!({
            "id": "gen-1",
            "choices": [
                { "message": { "role": "assistant", "content": PLAN_CONTENT } }
            ]
        }));
    });

    let client = StudyPlanClient::new(config_for(&server, Some("sk-test")))?;
    let plan = client.study_plan(&request()).await?;

    api_mock.assert();
    assert_eq!(plan.plan, PLAN_CONTENT);
    assert_eq!(
        plan.daily_tasks,
        vec![
            "Memorize 5 ayat after Fajr",
            "Review the previous day's portion"
        ]
    );
    // "Daily Tasks:" also opens the milestone section
    assert_eq!(
        plan.milestones,
        vec![
            "Memorize 5 ayat after Fajr",
            "Review the previous day's portion",
            "Finish Surah An-Naba",
            "Recite Surah An-Nazi'at from memory",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_study_plan_api_error_includes_remote_message() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(401).json_body(serde_json::json!({
            "error": { "message": "No auth credentials found", "code": 401 }
        }));
    });

    let client = StudyPlanClient::new(config_for(&server, Some("sk-bad")))?;
    let err = client.study_plan(&request()).await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, NoorError::ApiStatusError { status: 401, .. }));
    assert_eq!(
        err.to_string(),
        "API request failed: 401 Unauthorized. No auth credentials found"
    );
    Ok(())
}

#[tokio::test]
async fn test_study_plan_non_json_error_body() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(502).body("bad gateway");
    });

    let client = StudyPlanClient::new(config_for(&server, Some("sk-test")))?;
    let err = client.study_plan(&request()).await.unwrap_err();

    assert_eq!(err.to_string(), "API request failed: 502 Bad Gateway. ");
    Ok(())
}

#[tokio::test]
async fn test_study_plan_missing_choices() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({ "choices": [] }));
    });

    let client = StudyPlanClient::new(config_for(&server, Some("sk-test")))?;
    let err = client.study_plan(&request()).await.unwrap_err();

    assert!(matches!(err, NoorError::InvalidResponseError));
    assert_eq!(err.to_string(), "Invalid response format from AI service");
    Ok(())
}

#[test]
fn test_study_plan_missing_api_key_does_not_call_server() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let client = StudyPlanClient::new(config_for(&server, None))?;
    let err = tokio_test::block_on(client.study_plan(&request())).unwrap_err();

    assert!(matches!(err, NoorError::ConfigError { .. }));
    assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    api_mock.assert_hits(0);
    Ok(())
}

#[test]
fn test_study_plan_empty_goal_is_argument_error() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let client = StudyPlanClient::new(config_for(&server, Some("sk-test")))?;
    let blank_goal = StudyPlanRequest {
        goal: "   ".to_string(),
        ..request()
    };
    let err = tokio_test::block_on(client.study_plan(&blank_goal)).unwrap_err();

    assert!(matches!(err, NoorError::ValidationError { .. }));
    assert_eq!(err.recovery_suggestion(), "Check the command arguments");
    api_mock.assert_hits(0);
    Ok(())
}
