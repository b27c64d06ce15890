//! Composite 0–100 player rating.
//!
//! Three signals are min-max normalized across the whole working set and
//! blended with fixed weights:
//!
//! | signal        | raw value                     | weight |
//! |---------------|-------------------------------|--------|
//! | fantasy value | `1 / rank`, or 0 when unranked | 0.40   |
//! | points        | season points                 | 0.40   |
//! | shots         | season shots                  | 0.20   |
//!
//! The blend is scaled by 110 and capped at 100 so the top of the set can
//! reach the ceiling without most strong players sitting on it.

use crate::core::{ExternalRankings, Player};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};

/// 全部數值相同時的正規化結果
const FLAT_SIGNAL: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingWeights {
    pub fantasy: f64,
    pub points: f64,
    pub shots: f64,
    pub scale: f64,
    pub ceiling: u8,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            fantasy: 0.40,
            points: 0.40,
            shots: 0.20,
            scale: 110.0,
            ceiling: 100,
        }
    }
}

impl Validate for RatingWeights {
    fn validate(&self) -> Result<()> {
        validate_range("rating.fantasy", self.fantasy, 0.0, 1.0)?;
        validate_range("rating.points", self.points, 0.0, 1.0)?;
        validate_range("rating.shots", self.shots, 0.0, 1.0)?;

        let total = self.fantasy + self.points + self.shots;
        let total_in_range = total > 0.0 && total <= 1.0 + f64::EPSILON;
        if !total_in_range {
            return Err(crate::utils::error::RosterError::InvalidConfigValueError {
                field: "rating".to_string(),
                value: format!("{:.3}", total),
                reason: "Weights must sum to more than 0 and at most 1".to_string(),
            });
        }

        validate_range("rating.scale", self.scale, f64::MIN_POSITIVE, 1000.0)?;
        validate_range("rating.ceiling", self.ceiling, 1, 100)?;
        Ok(())
    }
}

/// Min-max normalizes `values` into [0, 1]; a flat signal maps to 0.5.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);
    let spread = max - min;

    if spread <= 0.0 || !spread.is_finite() {
        return vec![FLAT_SIGNAL; values.len()];
    }

    values.iter().map(|v| (v - min) / spread).collect()
}

fn fantasy_value(rank: Option<u32>) -> f64 {
    match rank {
        Some(rank) if rank > 0 => 1.0 / f64::from(rank),
        _ => 0.0,
    }
}

/// Rates every player with the default weights.
pub fn compute_ratings(players: &mut [Player], rankings: Option<&ExternalRankings>) {
    compute_ratings_with(players, rankings, &RatingWeights::default());
}

pub fn compute_ratings_with(
    players: &mut [Player],
    rankings: Option<&ExternalRankings>,
    weights: &RatingWeights,
) {
    if players.is_empty() {
        return;
    }

    let ranks: Vec<Option<u32>> = players
        .iter()
        .map(|p| rankings.and_then(|r| r.get(p.id)))
        .collect();

    let fantasy = normalize(&ranks.iter().map(|r| fantasy_value(*r)).collect::<Vec<_>>());
    let points = normalize(
        &players
            .iter()
            .map(|p| f64::from(p.stats.points))
            .collect::<Vec<_>>(),
    );
    let shots = normalize(
        &players
            .iter()
            .map(|p| f64::from(p.stats.shots))
            .collect::<Vec<_>>(),
    );

    let ceiling = f64::from(weights.ceiling.min(100));
    for (i, player) in players.iter_mut().enumerate() {
        let composite =
            weights.fantasy * fantasy[i] + weights.points * points[i] + weights.shots * shots[i];
        let scaled = (composite * weights.scale).clamp(0.0, ceiling);

        player.rating = Some(scaled.round() as u8);
        player.fantasy_rank = ranks[i];
    }

    tracing::debug!(
        "Rated {} players ({} with external rank)",
        players.len(),
        ranks.iter().filter(|r| r.is_some()).count()
    );
}
