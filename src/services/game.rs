//! Game catalog service
//!
//! Game types and the games gamers own. Events reference games from here.

use tracing::{info, debug};
use crate::database::repositories::GameRepository;
use crate::models::game::{Game, GameType, CreateGameRequest, MAX_GAME_TYPE_LABEL_LENGTH};
use crate::services::auth::{AuthService, AuthenticatedUser};
use crate::utils::errors::{LevelUpError, Result};
use crate::utils::helpers::check_text_field;

#[derive(Clone)]
pub struct GameService {
    game_repository: GameRepository,
    auth_service: AuthService,
}

impl GameService {
    pub fn new(game_repository: GameRepository, auth_service: AuthService) -> Self {
        Self { game_repository, auth_service }
    }

    /// Add a game type to the catalog; an existing label returns the stored type
    pub async fn create_game_type(&self, label: &str) -> Result<GameType> {
        check_text_field("label", label, MAX_GAME_TYPE_LABEL_LENGTH)
            .map_err(LevelUpError::Validation)?;

        let game_type = self.game_repository.create_game_type(label.trim()).await?;
        info!(game_type_id = game_type.id, label = %game_type.label, "Game type created");
        Ok(game_type)
    }

    pub async fn list_game_types(&self) -> Result<Vec<GameType>> {
        self.game_repository.list_game_types().await
    }

    /// Create a game owned by the caller
    pub async fn create_game(&self, user: &AuthenticatedUser, request: CreateGameRequest) -> Result<Game> {
        let owner = self.auth_service.resolve_gamer(user).await?;
        request.validate()?;

        if self.game_repository.find_game_type(request.game_type_id).await?.is_none() {
            return Err(LevelUpError::GameTypeNotFound { game_type_id: request.game_type_id });
        }

        let game = self.game_repository.create(request, owner.id).await?;
        info!(game_id = game.id, gamer_id = owner.id, title = %game.title, "Game created");
        Ok(game)
    }

    /// Get game by ID
    pub async fn get_game(&self, game_id: i64) -> Result<Game> {
        self.game_repository.find_by_id(game_id).await?
            .ok_or(LevelUpError::GameNotFound { game_id })
    }

    /// List games, optionally of one type
    pub async fn list_games(&self, game_type_id: Option<i64>) -> Result<Vec<Game>> {
        debug!(game_type_id = ?game_type_id, "Listing games");
        self.game_repository.list(game_type_id).await
    }

    /// Delete one of the caller's games; its events go with it
    pub async fn delete_game(&self, user: &AuthenticatedUser, game_id: i64) -> Result<()> {
        let caller = self.auth_service.resolve_gamer(user).await?;
        let game = self.get_game(game_id).await?;
        self.auth_service.require_owner(&caller, game.gamer_id, &format!("game {}", game_id))?;

        self.game_repository.delete(game_id).await?;
        info!(game_id = game_id, gamer_id = caller.id, "Game deleted");
        Ok(())
    }
}
