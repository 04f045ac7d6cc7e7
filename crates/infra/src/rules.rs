use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Singles,
    Doubles,
}

/// Rejection reasons for a submitted match, in the order the rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("all essential match details are required")]
    InvalidInput,
    #[error("doubles matches require a teammate on both sides")]
    MissingTeammate,
    #[error("a player cannot be their own teammate")]
    SelfTeammate,
    #[error("a player cannot appear more than once in a match")]
    DuplicatePlayer,
    #[error("a match cannot end in a draw")]
    DrawNotAllowed,
}

/// Raw match payload as it arrives on the wire. Every field is optional so
/// that the rules, not deserialization, decide what counts as missing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MatchSubmission {
    pub mode: Option<MatchMode>,
    pub player_a: Option<Uuid>,
    pub teammate_a: Option<Uuid>,
    pub player_b: Option<Uuid>,
    pub teammate_b: Option<Uuid>,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
}

/// A lineup that has passed validation. Singles matches cannot carry
/// teammates and doubles matches cannot lack them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineup {
    Singles {
        player_a: Uuid,
        player_b: Uuid,
    },
    Doubles {
        player_a: Uuid,
        teammate_a: Uuid,
        player_b: Uuid,
        teammate_b: Uuid,
    },
}

impl Lineup {
    pub fn is_doubles(&self) -> bool {
        matches!(self, Lineup::Doubles { .. })
    }

    /// Side A as (principal, teammate).
    pub fn side_a(&self) -> (Uuid, Option<Uuid>) {
        match *self {
            Lineup::Singles { player_a, .. } => (player_a, None),
            Lineup::Doubles {
                player_a,
                teammate_a,
                ..
            } => (player_a, Some(teammate_a)),
        }
    }

    /// Side B as (principal, teammate).
    pub fn side_b(&self) -> (Uuid, Option<Uuid>) {
        match *self {
            Lineup::Singles { player_b, .. } => (player_b, None),
            Lineup::Doubles {
                player_b,
                teammate_b,
                ..
            } => (player_b, Some(teammate_b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMatch {
    pub lineup: Lineup,
    pub score_a: i32,
    pub score_b: i32,
    /// Principal player of the winning side.
    pub winner: Uuid,
}

/// Derives the winning side's principal player. Only meaningful after
/// validation has ruled out a draw.
pub fn resolve_winner(player_a: Uuid, player_b: Uuid, score_a: i32, score_b: i32) -> Uuid {
    if score_a > score_b {
        player_a
    } else {
        player_b
    }
}

/// Checks a submission against the match rules and, when it holds, returns
/// the typed lineup with the derived winner.
///
/// Rules run in a fixed order: required fields, teammate presence,
/// self-teammate, duplicate participants, draw. The first violated rule wins,
/// so a payload that is broken in several ways reports the earliest reason.
pub fn validate(submission: &MatchSubmission) -> Result<ValidatedMatch, MatchError> {
    let (mode, player_a, player_b, score_a, score_b) = match (
        submission.mode,
        submission.player_a,
        submission.player_b,
        submission.score_a,
        submission.score_b,
    ) {
        (Some(m), Some(a), Some(b), Some(sa), Some(sb)) => (m, a, b, sa, sb),
        _ => return Err(MatchError::InvalidInput),
    };

    if score_a < 0 || score_b < 0 {
        return Err(MatchError::InvalidInput);
    }

    let lineup = match mode {
        MatchMode::Doubles => {
            let (teammate_a, teammate_b) = match (submission.teammate_a, submission.teammate_b) {
                (Some(ta), Some(tb)) => (ta, tb),
                _ => return Err(MatchError::MissingTeammate),
            };

            if player_a == teammate_a || player_b == teammate_b {
                return Err(MatchError::SelfTeammate);
            }

            let participants = [player_a, teammate_a, player_b, teammate_b];
            if !pairwise_distinct(&participants) {
                return Err(MatchError::DuplicatePlayer);
            }

            Lineup::Doubles {
                player_a,
                teammate_a,
                player_b,
                teammate_b,
            }
        }
        MatchMode::Singles => {
            if player_a == player_b {
                return Err(MatchError::DuplicatePlayer);
            }
            Lineup::Singles { player_a, player_b }
        }
    };

    if score_a == score_b {
        return Err(MatchError::DrawNotAllowed);
    }

    Ok(ValidatedMatch {
        lineup,
        score_a,
        score_b,
        winner: resolve_winner(player_a, player_b, score_a, score_b),
    })
}

fn pairwise_distinct(ids: &[Uuid]) -> bool {
    ids.iter()
        .enumerate()
        .all(|(i, id)| ids[i + 1..].iter().all(|other| other != id))
}
