//! Actor context resolution for authenticated requests.
//!
//! Credential and session mechanics live outside this service. The request
//! boundary delivers a resident identity (the `x-resident-id` header),
//! which is resolved here against the residents table. Every operation
//! then receives the resulting [`Actor`] as an explicit parameter — there
//! is no ambient request state.

use crate::{
    errors::AppError, models::resident::Resident, services::booking_service::BookingService,
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};

pub const RESIDENT_HEADER: &str = "x-resident-id";

/// The authenticated actor: resident identity, home floor and admin flag.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub resident_id: i64,
    pub floor_id: i64,
    pub is_admin: bool,
}

impl Actor {
    /// Guard for admin-only operations.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::new(
                StatusCode::FORBIDDEN,
                "administrator privileges required",
            ))
        }
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
    BookingService: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let service = BookingService::from_ref(state);

        let resident_id: i64 = parts
            .headers
            .get(RESIDENT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| {
                AppError::new(
                    StatusCode::UNAUTHORIZED,
                    format!("missing or malformed {RESIDENT_HEADER} header"),
                )
            })?;

        let resident = sqlx::query_as::<_, Resident>(
            "SELECT id, full_name, email, password_hash, floor_id, apartment, phone,
                    registered_at, is_active, is_admin
             FROM residents WHERE id = ?",
        )
        .bind(resident_id)
        .fetch_optional(&*service.db)
        .await
        .map_err(|err| {
            tracing::error!("failed to resolve actor {}: {}", resident_id, err);
            AppError::internal("internal storage error")
        })?;

        match resident {
            Some(resident) if resident.is_active => Ok(Actor {
                resident_id: resident.id,
                floor_id: resident.floor_id,
                is_admin: resident.is_admin,
            }),
            _ => Err(AppError::new(
                StatusCode::UNAUTHORIZED,
                "unknown or inactive resident",
            )),
        }
    }
}
