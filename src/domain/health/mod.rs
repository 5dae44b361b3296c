//! Health-score breakdown consumed read-only by the rules engine.
//!
//! The breakdown is produced by an external health-scoring collaborator
//! and stored on the deal row, either as a JSON object or as a
//! serialized-JSON string. Fourteen fixed parameter keys across six
//! categories explain the deal's computed health score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Org-level thresholds the derived signals are computed against.
///
/// Resolved per org by the health-config collaborator; resolution
/// failure degrades to these defaults rather than aborting generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Deal value above which a deal counts as high-value, in the
    /// deal's currency unit.
    pub high_value_floor: i64,
    /// Days in stage after which an open deal counts as stagnant
    /// (strict greater-than).
    pub stagnant_after_days: i64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            high_value_floor: 100_000,
            stagnant_after_days: 14,
        }
    }
}

/// The fourteen health parameters, keyed "1a".."6b".
///
/// Categories: 1 close-date credibility, 2 buyer engagement, 3 process
/// completion, 4 deal-size realism, 5 competitive/pricing risk,
/// 6 momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthParam {
    #[serde(rename = "1a")]
    CloseDateConfirmed,
    #[serde(rename = "1b")]
    CloseDatePushes,
    #[serde(rename = "2a")]
    ChampionIdentified,
    #[serde(rename = "2b")]
    DecisionMakerEngaged,
    #[serde(rename = "2c")]
    MultiThreading,
    #[serde(rename = "3a")]
    NextMeetingScheduled,
    #[serde(rename = "3b")]
    ProposalDelivered,
    #[serde(rename = "3c")]
    LegalEngaged,
    #[serde(rename = "4a")]
    BudgetConfirmed,
    #[serde(rename = "4b")]
    DealSizeRealism,
    #[serde(rename = "5a")]
    CompetitorsPresent,
    #[serde(rename = "5b")]
    DiscountPressure,
    #[serde(rename = "6a")]
    MeetingCadence,
    #[serde(rename = "6b")]
    EmailResponsiveness,
}

impl HealthParam {
    /// All fourteen parameters in key order.
    pub const ALL: [HealthParam; 14] = [
        HealthParam::CloseDateConfirmed,
        HealthParam::CloseDatePushes,
        HealthParam::ChampionIdentified,
        HealthParam::DecisionMakerEngaged,
        HealthParam::MultiThreading,
        HealthParam::NextMeetingScheduled,
        HealthParam::ProposalDelivered,
        HealthParam::LegalEngaged,
        HealthParam::BudgetConfirmed,
        HealthParam::DealSizeRealism,
        HealthParam::CompetitorsPresent,
        HealthParam::DiscountPressure,
        HealthParam::MeetingCadence,
        HealthParam::EmailResponsiveness,
    ];

    /// The stored breakdown key, e.g. "2b".
    pub fn key(&self) -> &'static str {
        match self {
            HealthParam::CloseDateConfirmed => "1a",
            HealthParam::CloseDatePushes => "1b",
            HealthParam::ChampionIdentified => "2a",
            HealthParam::DecisionMakerEngaged => "2b",
            HealthParam::MultiThreading => "2c",
            HealthParam::NextMeetingScheduled => "3a",
            HealthParam::ProposalDelivered => "3b",
            HealthParam::LegalEngaged => "3c",
            HealthParam::BudgetConfirmed => "4a",
            HealthParam::DealSizeRealism => "4b",
            HealthParam::CompetitorsPresent => "5a",
            HealthParam::DiscountPressure => "5b",
            HealthParam::MeetingCadence => "6a",
            HealthParam::EmailResponsiveness => "6b",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        HealthParam::ALL.iter().copied().find(|p| p.key() == key)
    }
}

/// Evaluation state of a single health parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Confirmed,
    Unknown,
    Absent,
}

/// Stored status for one parameter: the state plus whatever auxiliary
/// evidence the scoring collaborator attached for that rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamStatus {
    pub state: HealthState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_response_hours: Option<f64>,
}

impl ParamStatus {
    pub fn of(state: HealthState) -> Self {
        Self {
            state,
            count: None,
            ratio: None,
            competitors: Vec::new(),
            push_count: None,
            avg_response_hours: None,
        }
    }
}

/// Parsed health-score breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthBreakdown {
    params: HashMap<HealthParam, ParamStatus>,
}

impl HealthBreakdown {
    pub fn new(params: HashMap<HealthParam, ParamStatus>) -> Self {
        Self { params }
    }

    /// Parses the stored breakdown value, tolerating both a JSON object
    /// and a serialized-JSON string. Unknown keys are ignored; a value
    /// that cannot be parsed at all yields `None`.
    pub fn parse(raw: &Value) -> Option<Self> {
        let object = match raw {
            Value::Object(_) => raw.clone(),
            Value::String(s) => serde_json::from_str::<Value>(s).ok()?,
            _ => return None,
        };

        let map = object.as_object()?;
        let mut params = HashMap::new();
        for (key, value) in map {
            let Some(param) = HealthParam::from_key(key) else {
                continue;
            };
            if let Ok(status) = serde_json::from_value::<ParamStatus>(value.clone()) {
                params.insert(param, status);
            }
        }
        Some(Self { params })
    }

    pub fn get(&self, param: HealthParam) -> Option<&ParamStatus> {
        self.params.get(&param)
    }

    /// Convenience for rules: the state of a parameter, if recorded.
    pub fn state(&self, param: HealthParam) -> Option<HealthState> {
        self.params.get(&param).map(|s| s.state)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn set(&mut self, param: HealthParam, status: ParamStatus) {
        self.params.insert(param, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_fourteen_keys_round_trip() {
        for param in HealthParam::ALL {
            assert_eq!(HealthParam::from_key(param.key()), Some(param));
        }
    }

    #[test]
    fn parses_object_breakdown() {
        let raw = json!({
            "1a": { "state": "unknown" },
            "5a": { "state": "confirmed", "competitors": ["Rival Inc"] }
        });
        let breakdown = HealthBreakdown::parse(&raw).unwrap();
        assert_eq!(
            breakdown.state(HealthParam::CloseDateConfirmed),
            Some(HealthState::Unknown)
        );
        assert_eq!(
            breakdown.get(HealthParam::CompetitorsPresent).unwrap().competitors,
            vec!["Rival Inc"]
        );
    }

    #[test]
    fn parses_stringified_breakdown() {
        let raw = Value::String(r#"{"2b": {"state": "unknown"}}"#.to_string());
        let breakdown = HealthBreakdown::parse(&raw).unwrap();
        assert_eq!(
            breakdown.state(HealthParam::DecisionMakerEngaged),
            Some(HealthState::Unknown)
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let raw = json!({ "9z": { "state": "unknown" }, "1b": { "state": "confirmed", "push_count": 2 } });
        let breakdown = HealthBreakdown::parse(&raw).unwrap();
        assert_eq!(
            breakdown.get(HealthParam::CloseDatePushes).unwrap().push_count,
            Some(2)
        );
        assert!(breakdown.state(HealthParam::CloseDateConfirmed).is_none());
    }

    #[test]
    fn garbage_string_yields_none() {
        let raw = Value::String("not json".to_string());
        assert!(HealthBreakdown::parse(&raw).is_none());
    }

    #[test]
    fn non_object_value_yields_none() {
        assert!(HealthBreakdown::parse(&json!(42)).is_none());
    }
}
