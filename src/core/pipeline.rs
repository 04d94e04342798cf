use crate::core::kickoff::convert_kickoff;
use crate::core::render::render_digest;
use crate::core::scoring::{btts_score, select_and_rank};
use crate::core::{ConfigProvider, Digest, Fixture, FixtureRecord, FixturesEnvelope, Pipeline};
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};
use reqwest::Client;

pub const API_KEY_HEADER: &str = "x-apisports-key";

/// Fetches one day of fixtures and turns them into the BTTS reply.
pub struct FixturePipeline<C: ConfigProvider> {
    config: C,
    date: NaiveDate,
}

impl<C: ConfigProvider> FixturePipeline<C> {
    pub fn new(config: C, date: NaiveDate) -> Self {
        Self { config, date }
    }

    /// Uses the process-local calendar date.
    pub fn for_today(config: C) -> Self {
        Self::new(config, Local::now().date_naive())
    }

    pub fn fixtures_url(&self) -> String {
        format!(
            "{}/fixtures",
            self.config.provider_base_url().trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for FixturePipeline<C> {
    async fn extract(&self) -> Result<Vec<FixtureRecord>> {
        // One client per run; the connection pool is dropped with it.
        let client = Client::new();
        let url = self.fixtures_url();
        let date = self.date.format("%Y-%m-%d").to_string();

        tracing::debug!("Making API request to: {} (date={})", url, date);
        let response = client
            .get(&url)
            .query(&[("date", date.as_str())])
            .header(API_KEY_HEADER, self.config.api_key())
            .send()
            .await?;

        // The provider puts quota and auth problems in the JSON body, so the
        // body is decoded whatever the status.
        let status = response.status();
        if status.is_success() {
            tracing::debug!("API response status: {}", status);
        } else {
            tracing::warn!("API response status: {}", status);
        }

        let body = response.text().await?;
        let envelope: FixturesEnvelope = serde_json::from_str(&body)?;

        if let Some(errors) = envelope.provider_errors() {
            tracing::warn!("Provider reported errors: {}", errors);
        }

        let records = envelope.into_records();
        if records.is_empty() {
            tracing::info!("Provider returned no fixtures for {}", date);
        }

        Ok(records)
    }

    async fn transform(&self, records: Vec<FixtureRecord>) -> Result<Digest> {
        let zone = self.config.timezone();

        let fixtures: Vec<Fixture> = records
            .into_iter()
            .map(|record| Fixture {
                score: btts_score(record.teams.home.id, record.teams.away.id),
                kickoff: convert_kickoff(&record.fixture.date, zone),
                home: record.teams.home.name,
                away: record.teams.away.name,
                league: record.league.name,
            })
            .collect();

        let unparsed = fixtures.iter().filter(|f| !f.kickoff.is_known()).count();
        if unparsed > 0 {
            tracing::debug!("{} kickoff timestamps could not be parsed", unparsed);
        }

        let total = fixtures.len();
        let fixtures = select_and_rank(fixtures, self.config.min_score());
        tracing::debug!(
            "{} of {} fixtures scored above {}",
            fixtures.len(),
            total,
            self.config.min_score()
        );

        Ok(Digest {
            date: self.date,
            zone_label: self.config.zone_label().to_string(),
            fixtures,
        })
    }

    async fn load(&self, digest: Digest) -> Result<String> {
        Ok(render_digest(&digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::NO_MATCHES_MESSAGE;
    use crate::utils::error::BotError;
    use chrono_tz::Tz;
    use httpmock::prelude::*;

    struct MockConfig {
        base_url: String,
        api_key: String,
        min_score: u32,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                base_url,
                api_key: "test-key".to_string(),
                min_score: 50,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn provider_base_url(&self) -> &str {
            &self.base_url
        }

        fn api_key(&self) -> &str {
            &self.api_key
        }

        fn timezone(&self) -> Tz {
            chrono_tz::America::Bogota
        }

        fn zone_label(&self) -> &str {
            "Colombia time"
        }

        fn min_score(&self) -> u32 {
            self.min_score
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn fixture_json(home_id: i64, away_id: i64, league: &str, date: &str) -> serde_json::Value {
        serde_json::json!({
            "fixture": {"id": home_id * 1000 + away_id, "date": date},
            "league": {"id": 1, "name": league},
            "teams": {
                "home": {"id": home_id, "name": format!("Home {}", home_id)},
                "away": {"id": away_id, "name": format!("Away {}", away_id)}
            }
        })
    }

    #[test]
    fn test_fixtures_url_trims_trailing_slash() {
        let pipeline = FixturePipeline::new(
            MockConfig::new("https://v3.football.api-sports.io/".to_string()),
            test_date(),
        );
        assert_eq!(
            pipeline.fixtures_url(),
            "https://v3.football.api-sports.io/fixtures"
        );
    }

    #[tokio::test]
    async fn test_extract_sends_date_and_api_key() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/fixtures")
                .query_param("date", "2024-05-01")
                .header(API_KEY_HEADER, "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "response": [fixture_json(3, 1, "Primera A", "2024-05-01T23:00:00Z")]
                }));
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        let records = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].teams.home.id, 3);
        assert_eq!(records[0].league.name, "Primera A");
    }

    #[tokio::test]
    async fn test_extract_missing_or_null_response_is_empty() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(200).json_body(serde_json::json!({
                "errors": {"token": "Error/Missing application key"}
            }));
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        assert!(pipeline.extract().await.unwrap().is_empty());
        missing.assert();

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(200).json_body(serde_json::json!({"response": null}));
        });
        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        assert!(pipeline.extract().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_error_status_with_json_body_is_decoded() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(429).json_body(serde_json::json!({
                "errors": {"requests": "You have reached the request limit for the day"},
                "response": []
            }));
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        let records = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert!(records.is_empty());
        let digest = pipeline.transform(records).await.unwrap();
        assert_eq!(pipeline.load(digest).await.unwrap(), NO_MATCHES_MESSAGE);
    }

    #[tokio::test]
    async fn test_extract_error_status_with_fixtures_keeps_them() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(404).json_body(serde_json::json!({
                "response": [fixture_json(3, 1, "Primera A", "2024-05-01T23:00:00Z")]
            }));
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        assert_eq!(pipeline.extract().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_extract_error_status_without_json_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(500).body("Internal Server Error");
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        let result = pipeline.extract().await;
        assert!(matches!(result, Err(BotError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_extract_connection_failure_propagates() {
        let pipeline = FixturePipeline::new(
            MockConfig::new("http://127.0.0.1:1".to_string()),
            test_date(),
        );
        let result = pipeline.extract().await;
        assert!(matches!(result, Err(BotError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_extract_non_json_body_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(200).body("<html>maintenance</html>");
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        let result = pipeline.extract().await;
        assert!(matches!(result, Err(BotError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_extract_record_missing_teams_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/fixtures");
            then.status(200).json_body(serde_json::json!({
                "response": [{"league": {"name": "X"}, "fixture": {"date": "2024-05-01T23:00:00Z"}}]
            }));
        });

        let pipeline = FixturePipeline::new(MockConfig::new(server.base_url()), test_date());
        assert!(matches!(
            pipeline.extract().await,
            Err(BotError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_transform_filters_sorts_and_converts() {
        let records: Vec<FixtureRecord> = serde_json::from_value(serde_json::json!([
            fixture_json(1, 1, "Excluded", "2024-05-01T20:00:00Z"),
            fixture_json(1, 2, "Sixty", "2024-05-01T21:00:00Z"),
            fixture_json(3, 1, "Eighty", "2024-05-01T23:00:00Z"),
            fixture_json(4, 4, "Sixty again", "garbage"),
        ]))
        .unwrap();

        let pipeline = FixturePipeline::new(
            MockConfig::new("http://unused".to_string()),
            test_date(),
        );
        let digest = pipeline.transform(records).await.unwrap();

        let leagues: Vec<&str> = digest.fixtures.iter().map(|f| f.league.as_str()).collect();
        assert_eq!(leagues, vec!["Eighty", "Sixty", "Sixty again"]);
        assert_eq!(digest.fixtures[0].score, 80);
        assert_eq!(digest.fixtures[0].kickoff.to_string(), "18:00");
        assert_eq!(digest.fixtures[1].kickoff.to_string(), "16:00");
        assert_eq!(digest.fixtures[2].kickoff.to_string(), "?");
        assert_eq!(digest.zone_label, "Colombia time");
    }

    #[tokio::test]
    async fn test_transform_respects_configured_threshold() {
        let records: Vec<FixtureRecord> = serde_json::from_value(serde_json::json!([
            fixture_json(1, 2, "Sixty", "2024-05-01T21:00:00Z"),
            fixture_json(3, 1, "Eighty", "2024-05-01T23:00:00Z"),
        ]))
        .unwrap();

        let mut config = MockConfig::new("http://unused".to_string());
        config.min_score = 60;
        let pipeline = FixturePipeline::new(config, test_date());
        let digest = pipeline.transform(records).await.unwrap();

        assert_eq!(digest.fixtures.len(), 1);
        assert_eq!(digest.fixtures[0].league, "Eighty");
    }

    #[tokio::test]
    async fn test_load_empty_digest() {
        let pipeline = FixturePipeline::new(
            MockConfig::new("http://unused".to_string()),
            test_date(),
        );
        let digest = pipeline.transform(Vec::new()).await.unwrap();
        assert_eq!(pipeline.load(digest).await.unwrap(), NO_MATCHES_MESSAGE);
    }
}
