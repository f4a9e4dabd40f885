//! Event access layer
//!
//! Binds every roster operation to the authenticated caller: the identity is
//! resolved to a gamer first, then the event repository does the work. The
//! caller is the viewer for reads, the organizer for creation and the
//! member for signup/leave.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use crate::database::repositories::EventRepository;
use crate::models::event::{EventView, EventPayload, EventFilter};
use crate::models::Gamer;
use crate::services::auth::{AuthService, AuthenticatedUser};
use crate::utils::errors::{ErrorResponse, LevelUpError, Result};
use crate::utils::helpers::format_timestamp;
use crate::utils::logging::{log_event_action, log_operation_failure, log_roster_change};

#[derive(Clone)]
pub struct EventService {
    event_repository: EventRepository,
    auth_service: AuthService,
    max_description_length: usize,
}

impl EventService {
    pub fn new(event_repository: EventRepository, auth_service: AuthService, max_description_length: usize) -> Self {
        Self {
            event_repository,
            auth_service,
            max_description_length,
        }
    }

    /// GET one event
    pub async fn retrieve(&self, user: &AuthenticatedUser, event_id: i64) -> Result<EventView> {
        self.run("retrieve", user, |viewer| async move {
            self.event_repository.retrieve(event_id, Some(viewer.id)).await
        })
        .await
    }

    /// GET events, optionally filtered
    pub async fn list(&self, user: &AuthenticatedUser, filter: EventFilter) -> Result<Vec<EventView>> {
        self.run("list", user, |viewer| async move {
            let events = self.event_repository.list(Some(viewer.id), filter).await?;
            debug!(gamer_id = viewer.id, filter = ?filter, count = events.len(), "Listed events");
            Ok(events)
        })
        .await
    }

    /// Events the caller attends
    pub async fn list_joined(&self, user: &AuthenticatedUser) -> Result<Vec<EventView>> {
        self.run("list_joined", user, |viewer| async move {
            self.event_repository.list_joined(viewer.id).await
        })
        .await
    }

    /// POST an event organized by the caller
    pub async fn create(&self, user: &AuthenticatedUser, payload: EventPayload) -> Result<EventView> {
        self.run("create", user, |organizer| async move {
            let payload = payload.validate(self.max_description_length)?;
            let date = format_timestamp(payload.date);

            let event = self.event_repository.create(payload, organizer.id).await?;
            log_event_action(event.id, "create", organizer.id, Some(&date));
            Ok(event)
        })
        .await
    }

    /// PUT a full replacement of the caller's event
    pub async fn update(&self, user: &AuthenticatedUser, event_id: i64, payload: EventPayload) -> Result<()> {
        self.run("update", user, |caller| async move {
            if self.event_repository.find_by_id(event_id).await?.is_none() {
                return Err(LevelUpError::EventNotFound { event_id });
            }
            let payload = payload.validate(self.max_description_length)?;

            self.event_repository.update(event_id, payload, caller.id).await?;
            log_event_action(event_id, "update", caller.id, None);
            Ok(())
        })
        .await
    }

    /// DELETE the caller's event
    pub async fn destroy(&self, user: &AuthenticatedUser, event_id: i64) -> Result<()> {
        self.run("destroy", user, |caller| async move {
            self.event_repository.destroy(event_id, caller.id).await?;
            log_event_action(event_id, "destroy", caller.id, None);
            Ok(())
        })
        .await
    }

    /// Add the caller to the attendee set
    pub async fn signup(&self, user: &AuthenticatedUser, event_id: i64) -> Result<()> {
        self.run("signup", user, |gamer| async move {
            let changed = self.event_repository.signup(event_id, gamer.id).await?;
            log_roster_change(event_id, gamer.id, true, changed);
            log_event_action(event_id, "signup", gamer.id, None);
            Ok(())
        })
        .await
    }

    /// Remove the caller from the attendee set
    pub async fn leave(&self, user: &AuthenticatedUser, event_id: i64) -> Result<()> {
        self.run("leave", user, |gamer| async move {
            let changed = self.event_repository.leave(event_id, gamer.id).await?;
            log_roster_change(event_id, gamer.id, false, changed);
            log_event_action(event_id, "leave", gamer.id, None);
            Ok(())
        })
        .await
    }

    /// Resolve the caller, run `operation`, and log any failure
    async fn run<T, F, Fut>(&self, name: &str, user: &AuthenticatedUser, operation: F) -> Result<T>
    where
        F: FnOnce(Gamer) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let result = match self.auth_service.resolve_gamer(user).await {
            Ok(gamer) => operation(gamer).await,
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            log_operation_failure(name, &user.user_ref, e);
        }

        result
    }
}

/// Translate an access-layer result into the caller-facing shape
pub fn into_response<T>(result: Result<T>) -> std::result::Result<T, ErrorResponse> {
    result.map_err(|e: LevelUpError| e.to_response())
}

/// Render an access-layer result as a status code and JSON body
///
/// Successful unit results render as `null`, which callers send as an empty
/// body.
pub fn render<T: Serialize>(result: Result<T>, success_status: u16) -> (u16, Value) {
    let rendered = result.and_then(|value| Ok(serde_json::to_value(value)?));

    match rendered {
        Ok(body) => (success_status, body),
        Err(e) => {
            let response = e.to_response();
            (
                response.status,
                json!({
                    "status": response.status,
                    "error": response.error,
                    "message": response.message,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_success_and_failure() {
        let (status, body) = render(Ok(()), 204);
        assert_eq!(status, 204);
        assert!(body.is_null());

        let (status, body) = render::<()>(Err(LevelUpError::PermissionDenied("only the organizer may delete event 5".into())), 204);
        assert_eq!(status, 403);
        assert_eq!(body["error"], "permission_denied");
        assert_eq!(body["message"], "Permission denied: only the organizer may delete event 5");
    }

    #[test]
    fn test_into_response_passes_success_through() {
        let ok: Result<u8> = Ok(7);
        assert_eq!(into_response(ok), Ok(7));
    }

    #[test]
    fn test_into_response_translates_errors() {
        let missing: Result<()> = Err(LevelUpError::EventNotFound { event_id: 9999 });
        let response = into_response(missing).unwrap_err();
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "Event not found: 9999");
    }
}
