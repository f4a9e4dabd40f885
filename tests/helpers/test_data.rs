//! Test data helpers for creating gamers, games and events
//!
//! Builds a fully wired service layer over a test database and seeds the
//! catalog used by the roster scenarios.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use uuid::Uuid;
use levelup::config::Settings;
use levelup::database::DatabaseService;
use levelup::models::{CreateGamerRequest, CreateGameRequest, EventPayload, Game, GameType, Gamer};
use levelup::services::{AuthenticatedUser, ServiceFactory};

use super::database_helper::TestDatabase;

pub const FRIDAY_CHESS_DATE: &str = "2024-01-05T18:00:00Z";

/// A provisioned gamer together with the identity that authenticates as them
#[derive(Debug, Clone)]
pub struct TestGamer {
    pub gamer: Gamer,
    pub user: AuthenticatedUser,
}

impl TestGamer {
    pub fn id(&self) -> i64 {
        self.gamer.id
    }
}

/// Services wired over a test database
pub struct TestContext {
    pub db: TestDatabase,
    pub database: DatabaseService,
    pub services: ServiceFactory,
}

impl TestContext {
    pub fn new(db: TestDatabase) -> Self {
        let settings = Settings::default();
        let database = DatabaseService::new(db.pool.clone());
        let services = ServiceFactory::new(&settings, &database);

        Self { db, database, services }
    }

    /// Provision a gamer with a random name and a unique identity handle
    pub async fn gamer(&self) -> TestGamer {
        let user_ref = format!("auth|{}", Uuid::new_v4());
        let request = CreateGamerRequest {
            user_ref: user_ref.clone(),
            first_name: Some(FirstName().fake()),
            last_name: Some(LastName().fake()),
            bio: None,
        };

        let gamer = self.services.gamer_service
            .register_or_get(request)
            .await
            .expect("Failed to provision gamer");

        TestGamer {
            gamer,
            user: AuthenticatedUser::new(user_ref),
        }
    }

    pub async fn game_type(&self, label: &str) -> GameType {
        self.services.game_service
            .create_game_type(label)
            .await
            .expect("Failed to create game type")
    }

    /// Chess by Acme for two beginners, owned by `owner`
    pub async fn chess(&self, owner: &TestGamer, game_type: &GameType) -> Game {
        self.game(owner, game_type, "Chess").await
    }

    pub async fn game(&self, owner: &TestGamer, game_type: &GameType, title: &str) -> Game {
        let request = CreateGameRequest {
            title: title.to_string(),
            maker: "Acme".to_string(),
            num_of_players: "2".to_string(),
            skill_level: "Beginner".to_string(),
            game_type_id: game_type.id,
        };

        self.services.game_service
            .create_game(&owner.user, request)
            .await
            .expect("Failed to create game")
    }
}

pub fn friday_chess(game: &Game) -> EventPayload {
    EventPayload::new("Friday Chess", FRIDAY_CHESS_DATE, game.id)
}
