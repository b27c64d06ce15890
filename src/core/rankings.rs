use crate::core::decode::lenient_u64;
use crate::core::{ExternalRankings, PlayerId};
use serde_json::{Map, Value};

const ID_KEYS: [&str; 3] = ["playerId", "player_id", "id"];
const RANK_KEYS: [&str; 3] = ["rank", "fantasyRank", "fantasy_rank"];

/// Shapes accepted from an external ranking source.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingPayload {
    /// `[{"playerId": 1, "rank": 3}, ...]`
    Records(Vec<Value>),
    /// `{"8479318": 1, "8478483": 2}`
    Mapping(Map<String, Value>),
    Unsupported,
}

impl RankingPayload {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => RankingPayload::Records(items),
            Value::Object(map) => RankingPayload::Mapping(map),
            _ => RankingPayload::Unsupported,
        }
    }

    /// `None` 代表沒有排名可用
    pub fn into_rankings(self) -> Option<ExternalRankings> {
        match self {
            RankingPayload::Records(items) => Some(
                items
                    .iter()
                    .filter_map(|record| {
                        let id = first_present(record, &ID_KEYS).and_then(lenient_u64)?;
                        let rank = first_present(record, &RANK_KEYS).and_then(parse_rank)?;
                        Some((id, rank))
                    })
                    .collect(),
            ),
            RankingPayload::Mapping(map) => Some(
                map.iter()
                    .filter_map(|(key, rank)| {
                        let id: PlayerId = key.trim().parse().ok()?;
                        Some((id, parse_rank(rank)?))
                    })
                    .collect(),
            ),
            RankingPayload::Unsupported => None,
        }
    }
}

fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| record.get(*key))
}

fn parse_rank(value: &Value) -> Option<u32> {
    lenient_u64(value)
        .filter(|rank| *rank >= 1)
        .and_then(|rank| u32::try_from(rank).ok())
}

/// Decodes a raw payload; unsupported shapes and payloads that yield no
/// usable entry are both reported as absent.
pub fn decode_rankings(value: Value) -> Option<ExternalRankings> {
    match RankingPayload::classify(value).into_rankings() {
        Some(rankings) if !rankings.is_empty() => Some(rankings),
        Some(_) => {
            tracing::warn!("⚠️ Ranking payload contained no usable entries");
            None
        }
        None => {
            tracing::warn!("⚠️ Unsupported ranking payload shape, ignoring rankings");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_shape() {
        let rankings = decode_rankings(json!([
            {"playerId": 8479318, "rank": 1},
            {"player_id": "8478483", "fantasyRank": "4"},
            {"id": 8477939, "fantasy_rank": 12.0},
            {"playerId": 1, "rank": 0},
            {"playerId": 2, "rank": -3},
            {"rank": 5}
        ]))
        .unwrap();

        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings.get(8479318), Some(1));
        assert_eq!(rankings.get(8478483), Some(4));
        assert_eq!(rankings.get(8477939), Some(12));
        assert_eq!(rankings.get(1), None);
    }

    #[test]
    fn test_mapping_shape() {
        let rankings = decode_rankings(json!({
            "8479318": 1,
            "8478483": "2",
            "not-an-id": 3,
            "42": "n/a"
        }))
        .unwrap();

        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings.get(8478483), Some(2));
    }

    #[test]
    fn test_unsupported_shapes_are_absent() {
        assert_eq!(decode_rankings(json!("rankings")), None);
        assert_eq!(decode_rankings(json!(17)), None);
        assert_eq!(decode_rankings(json!(null)), None);
        assert_eq!(decode_rankings(json!(true)), None);
    }

    #[test]
    fn test_empty_payloads_are_absent() {
        assert_eq!(decode_rankings(json!([])), None);
        assert_eq!(decode_rankings(json!({})), None);
    }

    #[test]
    fn test_classify() {
        assert!(matches!(
            RankingPayload::classify(json!([])),
            RankingPayload::Records(_)
        ));
        assert!(matches!(
            RankingPayload::classify(json!({})),
            RankingPayload::Mapping(_)
        ));
        assert_eq!(
            RankingPayload::classify(json!(1.5)),
            RankingPayload::Unsupported
        );
    }
}
