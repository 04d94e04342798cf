use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown instead of a kickoff time that could not be parsed.
pub const KICKOFF_PLACEHOLDER: &str = "?";

/// Top-level body of `GET /fixtures`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesEnvelope {
    #[serde(default)]
    pub response: Option<Vec<FixtureRecord>>,
    /// The provider reports quota and auth problems here with a 200 status,
    /// either as an object or an array.
    #[serde(default)]
    pub errors: serde_json::Value,
}

impl FixturesEnvelope {
    pub fn into_records(self) -> Vec<FixtureRecord> {
        self.response.unwrap_or_default()
    }

    pub fn provider_errors(&self) -> Option<String> {
        match &self.errors {
            serde_json::Value::Object(map) if !map.is_empty() => Some(self.errors.to_string()),
            serde_json::Value::Array(items) if !items.is_empty() => Some(self.errors.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub teams: TeamsRecord,
    pub league: LeagueRecord,
    pub fixture: FixtureInfoRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsRecord {
    pub home: TeamRecord,
    pub away: TeamRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInfoRecord {
    pub date: String,
}

/// Kickoff time in the report zone. Parse failures are carried as `Unknown`
/// so a single bad timestamp never aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kickoff {
    At(DateTime<Tz>),
    Unknown,
}

impl Kickoff {
    pub fn is_known(&self) -> bool {
        matches!(self, Kickoff::At(_))
    }
}

impl fmt::Display for Kickoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kickoff::At(at) => write!(f, "{}", at.format("%H:%M")),
            Kickoff::Unknown => f.write_str(KICKOFF_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub home: String,
    pub away: String,
    pub league: String,
    pub kickoff: Kickoff,
    pub score: u32,
}

/// Qualifying fixtures for one day, already filtered and ranked.
#[derive(Debug, Clone)]
pub struct Digest {
    pub date: NaiveDate,
    pub zone_label: String,
    pub fixtures: Vec<Fixture>,
}

impl Digest {
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
