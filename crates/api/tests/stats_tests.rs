mod common;

use common::*;
use infra::repos::MatchRepo;
use infra::rules::{validate, MatchMode, MatchSubmission};
use infra::stats::compute_user_stats;
use uuid::Uuid;

async fn record_singles(state: &api::AppState, a: Uuid, b: Uuid, score_a: i32, score_b: i32) {
    let submission = MatchSubmission {
        mode: Some(MatchMode::Singles),
        player_a: Some(a),
        player_b: Some(b),
        score_a: Some(score_a),
        score_b: Some(score_b),
        ..Default::default()
    };
    MatchRepo::new(state.db.clone())
        .create(validate(&submission).unwrap())
        .await
        .expect("record singles match");
}

async fn record_doubles(
    state: &api::AppState,
    side_a: (Uuid, Uuid),
    side_b: (Uuid, Uuid),
    score_a: i32,
    score_b: i32,
) {
    let submission = MatchSubmission {
        mode: Some(MatchMode::Doubles),
        player_a: Some(side_a.0),
        teammate_a: Some(side_a.1),
        player_b: Some(side_b.0),
        teammate_b: Some(side_b.1),
        score_a: Some(score_a),
        score_b: Some(score_b),
    };
    MatchRepo::new(state.db.clone())
        .create(validate(&submission).unwrap())
        .await
        .expect("record doubles match");
}

#[tokio::test]
async fn recomputed_stats_track_each_recorded_match() {
    let state = setup_test_db().await;
    let a = create_test_player(&state, "Frida").await;
    let b = create_test_player(&state, "Georg").await;
    let matches = MatchRepo::new(state.db.clone());

    let before = compute_user_stats(a.id, &matches.history_for(a.id).await.unwrap());
    assert_eq!(before.overall.total_matches, 0);
    assert_eq!(before.overall.win_rate, 0.0);

    record_singles(&state, a.id, b.id, 11, 9).await;

    let after = compute_user_stats(a.id, &matches.history_for(a.id).await.unwrap());
    assert_eq!(after.overall.total_matches, 1);
    assert_eq!(after.overall.wins, 1);
    assert_eq!(after.overall.losses, 0);
    assert_eq!(after.overall.win_rate, 100.0);

    let loser = compute_user_stats(b.id, &matches.history_for(b.id).await.unwrap());
    assert_eq!(loser.overall.total_matches, 1);
    assert_eq!(loser.overall.wins, 0);
    assert_eq!(loser.overall.losses, 1);
}

#[tokio::test]
async fn doubles_teammate_gets_win_credit_from_history() {
    let state = setup_test_db().await;
    let p1 = create_test_player(&state, "Hana").await;
    let p2 = create_test_player(&state, "Iris").await;
    let p3 = create_test_player(&state, "Jonas").await;
    let p4 = create_test_player(&state, "Kira").await;
    let matches = MatchRepo::new(state.db.clone());

    record_doubles(&state, (p1.id, p2.id), (p3.id, p4.id), 11, 9).await;

    // winner_id names p1, the winning side's principal; p2 is credited
    // through side membership.
    let teammate = compute_user_stats(p2.id, &matches.history_for(p2.id).await.unwrap());
    assert_eq!(teammate.overall.wins, 1);
    assert_eq!(teammate.overall.losses, 0);

    let opponent = compute_user_stats(p3.id, &matches.history_for(p3.id).await.unwrap());
    assert_eq!(opponent.overall.wins, 0);
    assert_eq!(opponent.overall.losses, 1);
    assert_eq!(opponent.teammates.len(), 1);
    assert_eq!(opponent.teammates[0].teammate, p4.id);
}

#[tokio::test]
async fn opponent_breakdown_spans_singles_and_doubles() {
    let state = setup_test_db().await;
    let p1 = create_test_player(&state, "Luca").await;
    let p2 = create_test_player(&state, "Mika").await;
    let p3 = create_test_player(&state, "Nora").await;
    let p4 = create_test_player(&state, "Otto").await;
    let matches = MatchRepo::new(state.db.clone());

    record_doubles(&state, (p1.id, p2.id), (p3.id, p4.id), 11, 9).await;
    record_singles(&state, p1.id, p3.id, 7, 11).await;

    let stats = compute_user_stats(p1.id, &matches.history_for(p1.id).await.unwrap());
    let against_p3 = stats
        .opponents
        .iter()
        .find(|o| o.opponent == p3.id)
        .expect("p3 is an opponent");

    assert_eq!(against_p3.games, 2);
    assert_eq!(against_p3.wins, 1);
    assert_eq!(against_p3.losses, 1);
}
