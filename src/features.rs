//! Engineered features derived from an assembled record. All ratios share
//! one guard: a zero denominator yields 0.0, never NaN or an error.

use crate::extract::{round1, round3};
use crate::mappings;
use crate::record::ProspectRecord;

#[derive(Debug, Clone, Default)]
pub struct EngineeredFeatures {
    /// Height (cm) over weight (kg).
    pub height_weight: f64,
    /// Weight (kg) over squared height (m).
    pub bmi: f64,
    /// AST% over TOV%.
    pub ast_tov: f64,
    /// Points per 40 over usage.
    pub pts_usg: f64,
    /// Three-point attempts over all field goal attempts.
    pub three_rate: f64,
    /// Three-point attempt rate scaled by true shooting.
    pub spacing_ts: f64,
    /// Blend of free-throw and three-point accuracy.
    pub shot_touch_blend: f64,
    pub team_dev_score: f64,
    pub college_strength: f64,
}

/// Compute the engineered feature block for a record whose raw fields are
/// already in place.
pub fn engineer(record: &ProspectRecord) -> EngineeredFeatures {
    EngineeredFeatures {
        height_weight: ratio(record.height_cm, record.weight_kg),
        bmi: bmi(record.height_cm, record.weight_kg),
        ast_tov: ratio(record.advanced.ast_pct, record.advanced.tov_pct),
        pts_usg: ratio(record.per40.pts, record.advanced.usg_pct),
        three_rate: ratio(record.per_game.fg3a, record.per_game.fga),
        spacing_ts: round3(record.advanced.fg3a_rate * record.advanced.ts_pct),
        shot_touch_blend: round3(0.6 * record.per_game.ft_pct + 0.4 * record.per_game.fg3_pct),
        team_dev_score: mappings::team_development_score(&record.nba_team),
        college_strength: mappings::college_strength(&record.college),
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round3(numerator / denominator)
    }
}

fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    if height_cm == 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round1(weight_kg / (height_m * height_m))
}
