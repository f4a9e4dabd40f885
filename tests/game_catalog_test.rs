//! Game catalog integration tests
//!
//! Game types, game ownership, and the cascades from games and gamers into
//! the event roster.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use levelup::models::CreateGameRequest;
use levelup::LevelUpError;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_create_game_binds_owner_and_type() {
    let ctx = TestContext::new(require_db!());
    let a = ctx.gamer().await;
    let board = ctx.game_type("Board game").await;

    let chess = ctx.chess(&a, &board).await;
    assert_eq!(chess.title, "Chess");
    assert_eq!(chess.maker, "Acme");
    assert_eq!(chess.num_of_players, "2");
    assert_eq!(chess.skill_level, "Beginner");
    assert_eq!(chess.gamer_id, a.id());
    assert_eq!(chess.game_type_id, board.id);

    let fetched = ctx.services.game_service.get_game(chess.id).await.unwrap();
    assert_eq!(fetched, chess);
}

#[tokio::test]
#[serial]
async fn test_create_game_with_unknown_type_fails() {
    let ctx = TestContext::new(require_db!());
    let a = ctx.gamer().await;

    let request = CreateGameRequest {
        title: "Chess".to_string(),
        maker: "Acme".to_string(),
        num_of_players: "2".to_string(),
        skill_level: "Beginner".to_string(),
        game_type_id: 77,
    };

    assert_matches!(
        ctx.services.game_service.create_game(&a.user, request).await,
        Err(LevelUpError::GameTypeNotFound { game_type_id: 77 })
    );
}

#[tokio::test]
#[serial]
async fn test_list_games_by_type() {
    let ctx = TestContext::new(require_db!());
    let a = ctx.gamer().await;
    let board = ctx.game_type("Board game").await;
    let cards = ctx.game_type("Card game").await;

    let chess = ctx.chess(&a, &board).await;
    let poker = ctx.game(&a, &cards, "Poker").await;

    let games = &ctx.services.game_service;
    assert_eq!(games.list_games(None).await.unwrap(), vec![chess.clone(), poker.clone()]);
    assert_eq!(games.list_games(Some(cards.id)).await.unwrap(), vec![poker]);
    assert_eq!(games.list_game_types().await.unwrap(), vec![board, cards]);
}

#[tokio::test]
#[serial]
async fn test_duplicate_game_type_label_returns_existing() {
    let ctx = TestContext::new(require_db!());
    let board = ctx.game_type("Board game").await;

    let again = ctx.services.game_service
        .create_game_type("  Board game ")
        .await
        .expect("Duplicate label should not fail");

    assert_eq!(again, board);
    assert_eq!(ctx.db.count_records("game_types").await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_only_owner_deletes_game_and_events_cascade() {
    let ctx = TestContext::new(require_db!());
    let (a, b) = (ctx.gamer().await, ctx.gamer().await);
    let board = ctx.game_type("Board game").await;
    let chess = ctx.chess(&a, &board).await;

    let event = ctx.services.event_service.create(&b.user, friday_chess(&chess)).await.unwrap();
    ctx.services.event_service.signup(&a.user, event.id).await.unwrap();

    assert_matches!(
        ctx.services.game_service.delete_game(&b.user, chess.id).await,
        Err(LevelUpError::PermissionDenied(_))
    );

    ctx.services.game_service.delete_game(&a.user, chess.id).await.unwrap();

    assert_eq!(ctx.db.count_records("events").await.unwrap(), 0);
    assert_eq!(ctx.db.count_records("event_attendees").await.unwrap(), 0);
    assert_matches!(
        ctx.services.game_service.get_game(chess.id).await,
        Err(LevelUpError::GameNotFound { .. })
    );
}

#[tokio::test]
#[serial]
async fn test_removing_gamer_cascades_to_events_and_memberships() {
    let ctx = TestContext::new(require_db!());
    let (a, b) = (ctx.gamer().await, ctx.gamer().await);
    let board = ctx.game_type("Board game").await;
    let chess = ctx.chess(&a, &board).await;
    let go = ctx.game(&b, &board, "Go").await;
    let events = &ctx.services.event_service;

    let hosted_by_b = events.create(&b.user, friday_chess(&go)).await.unwrap();
    let hosted_by_a = events.create(&a.user, friday_chess(&chess)).await.unwrap();
    events.signup(&b.user, hosted_by_a.id).await.unwrap();

    ctx.services.gamer_service.remove_gamer(b.id()).await.unwrap();

    assert_matches!(
        ctx.database.events.retrieve(hosted_by_b.id, None).await,
        Err(LevelUpError::EventNotFound { .. })
    );
    let remaining = events.retrieve(&a.user, hosted_by_a.id).await.unwrap();
    assert_eq!(remaining.attendees, vec![a.id()]);

    assert_matches!(
        ctx.services.gamer_service.get_gamer(b.id()).await,
        Err(LevelUpError::GamerNotFound { .. })
    );
    assert_matches!(
        ctx.services.event_service.list(&b.user, Default::default()).await,
        Err(LevelUpError::Authorization(_))
    );
}

#[tokio::test]
#[serial]
async fn test_catalog_stats() {
    let ctx = TestContext::new(require_db!());
    let a = ctx.gamer().await;
    let board = ctx.game_type("Board game").await;
    let chess = ctx.chess(&a, &board).await;
    ctx.services.event_service.create(&a.user, friday_chess(&chess)).await.unwrap();

    let stats = ctx.database.get_stats().await.unwrap();
    assert_eq!((stats.gamers, stats.games, stats.events), (1, 1, 1));
}
