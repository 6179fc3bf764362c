use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ChatError;

/// Per-user request accounting reported by the service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UsageStats {
    pub message: String,
    pub user_id: String,
    pub requests_all_time: u64,
    pub requests_this_minute: u64,
}

#[derive(Deserialize)]
struct StatsResponse {
    result: Value,
}

/// Fetch usage statistics for one user.
///
/// The service sometimes sends the `result` field pre-serialized as a
/// JSON string instead of an object; both shapes decode to the same
/// `UsageStats`.
pub async fn my_stats(
    user_id: &str,
    api_hostname: &str,
    api_key: &str,
) -> Result<UsageStats, ChatError> {
    let url = format!("{}/my_stats/{}", api_hostname.trim_end_matches("/"), user_id);
    let response: StatsResponse = reqwest::Client::new()
        .get(url)
        .bearer_auth(api_key)
        .timeout(Duration::from_secs(30))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let stats = match response.result {
        Value::String(encoded) => serde_json::from_str(&encoded)?,
        value => serde_json::from_value(value)?,
    };

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_JSON: &str = r#"{
        "message": "ok",
        "user_id": "u1",
        "requests_all_time": 42,
        "requests_this_minute": 3
    }"#;

    #[tokio::test]
    async fn test_my_stats_structured_result() {
        let mut server = mockito::Server::new_async().await;

        let body = format!(r#"{{"result": {}}}"#, STATS_JSON);
        let mock = server
            .mock("GET", "/my_stats/u1")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let stats = my_stats("u1", server.url().as_str(), "test-key")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(stats.user_id, "u1");
        assert_eq!(stats.requests_all_time, 42);
        assert_eq!(stats.requests_this_minute, 3);
    }

    #[tokio::test]
    async fn test_my_stats_string_encoded_result() {
        let mut server = mockito::Server::new_async().await;

        // The same stats, but with `result` arriving as an encoded string
        let body = serde_json::json!({
            "result": STATS_JSON,
        })
        .to_string();
        let mock = server
            .mock("GET", "/my_stats/u1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let stats = my_stats("u1", server.url().as_str(), "test-key")
            .await
            .unwrap();

        mock.assert();
        let expected: UsageStats = serde_json::from_str(STATS_JSON).unwrap();
        assert_eq!(stats, expected);
    }

    #[tokio::test]
    async fn test_my_stats_non_success_status() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/my_stats/missing")
            .with_status(404)
            .with_body("no such user")
            .create();

        let result = my_stats("missing", server.url().as_str(), "test-key").await;

        mock.assert();
        assert!(matches!(result, Err(ChatError::Transport(_))));
    }

    #[tokio::test]
    async fn test_my_stats_undecodable_result() {
        let mut server = mockito::Server::new_async().await;

        // A string result that is not valid JSON
        let mock = server
            .mock("GET", "/my_stats/u1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": "not json"}"#)
            .create();

        let result = my_stats("u1", server.url().as_str(), "test-key").await;

        mock.assert();
        assert!(matches!(result, Err(ChatError::Decode(_))));
    }
}
