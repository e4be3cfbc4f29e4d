use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const INITIAL_RATING: f64 = 1500.0;
pub const K_FACTOR: f64 = 32.0;

/// The result of one game between two named players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub player_a: String,
    pub player_b: String,
    /// `None` for a draw.
    pub winner: Option<String>,
}

fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / 400.0))
}

/// Replays the outcomes in order, updating both players' ratings after every
/// game. Players start at `initial`. A win scores 1, a draw 0.5.
pub fn compute_elo(outcomes: &[Outcome], initial: f64, k: f64) -> BTreeMap<String, f64> {
    let mut ratings = BTreeMap::new();
    for outcome in outcomes {
        let ra = *ratings.entry(outcome.player_a.clone()).or_insert(initial);
        let rb = *ratings.entry(outcome.player_b.clone()).or_insert(initial);
        let ea = expected_score(ra, rb);
        let eb = 1.0 - ea;
        let (sa, sb) = match &outcome.winner {
            None => (0.5, 0.5),
            Some(winner) if *winner == outcome.player_a => (1.0, 0.0),
            Some(_) => (0.0, 1.0),
        };
        ratings.insert(outcome.player_a.clone(), ra + k * (sa - ea));
        ratings.insert(outcome.player_b.clone(), rb + k * (sb - eb));
    }
    ratings
}

/// Ratings sorted from best to worst.
pub fn standings(ratings: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut standings: Vec<(&str, f64)> = ratings
        .iter()
        .map(|(name, &rating)| (name.as_str(), rating))
        .collect();
    standings.sort_by(|a, b| b.1.total_cmp(&a.1));
    standings
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn outcome(a: &str, b: &str, winner: Option<&str>) -> Outcome {
        Outcome {
            player_a: String::from(a),
            player_b: String::from(b),
            winner: winner.map(String::from),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_game() {
        let ratings = compute_elo(&[outcome("x", "y", Some("x"))], INITIAL_RATING, K_FACTOR);
        assert!(close(ratings["x"], 1516.0));
        assert!(close(ratings["y"], 1484.0));
    }

    #[test]
    fn draw_between_equals_changes_nothing() {
        let ratings = compute_elo(&[outcome("x", "y", None)], INITIAL_RATING, K_FACTOR);
        assert!(close(ratings["x"], 1500.0));
        assert!(close(ratings["y"], 1500.0));
    }

    #[test]
    fn upset_gains_more() {
        let outcomes = [
            outcome("x", "y", Some("x")),
            outcome("x", "y", Some("y")),
        ];
        let ratings = compute_elo(&outcomes, INITIAL_RATING, K_FACTOR);
        // y was rated 1484 against 1516 when it won
        let gain = 32.0 * (1.0 - expected_score(1484.0, 1516.0));
        assert!(gain > 16.0);
        assert!(close(ratings["y"], 1484.0 + gain));
        assert_eq!(standings(&ratings)[0].0, "y");
    }

    #[test]
    fn no_games() {
        assert!(compute_elo(&[], INITIAL_RATING, K_FACTOR).is_empty());
    }

    quickcheck! {
        fn ratings_are_zero_sum(games: Vec<(bool, Option<bool>)>) -> bool {
            let outcomes: Vec<Outcome> = games
                .iter()
                .map(|&(swap, result)| {
                    let (a, b) = if swap { ("p", "q") } else { ("q", "p") };
                    outcome(a, b, result.map(|a_wins| if a_wins { a } else { b }))
                })
                .collect();
            let ratings = compute_elo(&outcomes, INITIAL_RATING, K_FACTOR);
            let total: f64 = ratings.values().sum();
            (total - INITIAL_RATING * ratings.len() as f64).abs() < 1e-6
        }
    }
}
