use crate::domain::model::Fixture;

pub const DEFAULT_MIN_SCORE: u32 = 50;

const SCORE_BUCKETS: i128 = 5;
const SCORE_STEP: u32 = 20;

/// Stand-in "both teams to score" probability, in percent.
///
/// Not a predictive model: it only mixes the two team ids so the output is
/// deterministic and lands in `{0, 20, 40, 60, 80}`. Replace with a real
/// model when one exists.
pub fn btts_score(home_id: i64, away_id: i64) -> u32 {
    let bucket = (i128::from(home_id) + i128::from(away_id)).rem_euclid(SCORE_BUCKETS);
    bucket as u32 * SCORE_STEP
}

pub fn qualifies(score: u32, min_score: u32) -> bool {
    score > min_score
}

/// Drops fixtures at or below `min_score` and orders the rest by score,
/// highest first. Ties keep their provider order.
pub fn select_and_rank(fixtures: Vec<Fixture>, min_score: u32) -> Vec<Fixture> {
    let mut selected: Vec<Fixture> = fixtures
        .into_iter()
        .filter(|fixture| qualifies(fixture.score, min_score))
        .collect();
    selected.sort_by(|a, b| b.score.cmp(&a.score));
    selected
}
