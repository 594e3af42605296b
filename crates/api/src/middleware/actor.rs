//! Actor identification.
//!
//! Authentication is handled by the club's reverse proxy; by the time a
//! request reaches this service the acting member's id arrives in the
//! `X-Actor-Id` header. This extractor rejects requests without one, since
//! every block operation needs an actor for its audit trail.

use axum::{extract::FromRequestParts, http::request::Parts};

use clubcourt_core::{errors::CourtError, messages};

use crate::middleware::error_handling::AppError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Id of the member performing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .map(ActorId)
            .ok_or_else(|| {
                AppError(CourtError::Validation(
                    messages::error::ACTOR_ID_REQUIRED.to_string(),
                ))
            })
    }
}
