use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::MatchRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OverallRecord {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage rounded to one decimal; 0 when no matches were played.
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpponentRecord {
    pub opponent: Uuid,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeammateRecord {
    pub teammate: Uuid,
    pub matches_together: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub overall: OverallRecord,
    pub opponents: Vec<OpponentRecord>,
    pub teammates: Vec<TeammateRecord>,
    pub strongest_opponent: Option<Uuid>,
    pub easiest_opponent: Option<Uuid>,
    pub best_teammate: Option<Uuid>,
}

#[derive(Default)]
struct OpponentAcc {
    games: u32,
    wins: u32,
    losses: u32,
}

/// Aggregates a user's record from the full match history in one pass.
///
/// A win is credited by side membership: a doubles teammate on the winning
/// side counts a win even though `winner_id` names that side's principal.
/// An unknown user or empty history yields zeroed stats, never an error.
pub fn compute_user_stats(user: Uuid, history: &[MatchRow]) -> UserStats {
    let mut overall = OverallRecord::default();
    // Keyed maps iterate by identifier, which keeps the derived views and
    // the breakdown ordering deterministic.
    let mut opponents: BTreeMap<Uuid, OpponentAcc> = BTreeMap::new();
    let mut teammates: BTreeMap<Uuid, u32> = BTreeMap::new();

    for m in history {
        let side_a = [Some(m.player_a), m.teammate_a];
        let side_b = [Some(m.player_b), m.teammate_b];

        let on_a = side_a.contains(&Some(user));
        let on_b = side_b.contains(&Some(user));
        if !on_a && !on_b {
            continue;
        }

        let (own_side, other_side) = if on_a {
            (side_a, side_b)
        } else {
            (side_b, side_a)
        };
        let won = own_side.contains(&Some(m.winner_id));

        overall.total_matches += 1;
        if won {
            overall.wins += 1;
        } else {
            overall.losses += 1;
        }

        for opponent in other_side.into_iter().flatten() {
            let acc = opponents.entry(opponent).or_default();
            acc.games += 1;
            if won {
                acc.wins += 1;
            } else {
                acc.losses += 1;
            }
        }

        for partner in own_side.into_iter().flatten() {
            if partner != user {
                *teammates.entry(partner).or_default() += 1;
            }
        }
    }

    overall.win_rate = win_rate(overall.wins, overall.total_matches);

    let strongest_opponent = opponents
        .iter()
        .filter(|(_, acc)| acc.games > 0)
        .min_by(|(_, a), (_, b)| {
            // Lowest win rate for the user; compare wins/games without
            // division so equal rates stay exact. Ties fall to more losses,
            // then to the smaller identifier via map order.
            (a.wins as u64 * b.games as u64)
                .cmp(&(b.wins as u64 * a.games as u64))
                .then(b.losses.cmp(&a.losses))
        })
        .map(|(id, _)| *id);

    let easiest_opponent = opponents
        .iter()
        .filter(|(_, acc)| acc.wins > 0)
        .max_by(|(id_a, a), (id_b, b)| {
            (a.wins as u64 * b.games as u64)
                .cmp(&(b.wins as u64 * a.games as u64))
                .then(a.wins.cmp(&b.wins))
                // On a full tie prefer the smaller identifier; max_by keeps
                // the later entry on Equal, so order by reversed key.
                .then(id_b.cmp(id_a))
        })
        .map(|(id, _)| *id);

    let best_teammate = teammates
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(id, _)| *id);

    UserStats {
        overall,
        opponents: opponents
            .into_iter()
            .map(|(opponent, acc)| OpponentRecord {
                opponent,
                games: acc.games,
                wins: acc.wins,
                losses: acc.losses,
            })
            .collect(),
        teammates: teammates
            .into_iter()
            .map(|(teammate, matches_together)| TeammateRecord {
                teammate,
                matches_together,
            })
            .collect(),
        strongest_opponent,
        easiest_opponent,
        best_teammate,
    }
}

fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (wins as f64 / total as f64 * 1000.0).round() / 10.0
}
