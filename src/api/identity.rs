//! Actor identity extraction from request headers
//!
//! The service trusts an upstream gateway for authentication and reads the
//! caller's identity from two headers:
//!
//! - `x-actor-id`   — numeric customer ID of the caller
//! - `x-actor-role` — `staff` marks a fleet employee; anything else (or
//!   absence) means a regular customer
//!
//! Missing or malformed headers degrade to an anonymous actor; ownership
//! and staff checks in the application layer then reject the operation
//! with a domain error instead of a transport-level 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::application::Actor;

const ACTOR_ID_HEADER: &str = "x-actor-id";
const ACTOR_ROLE_HEADER: &str = "x-actor-role";

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let customer_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i32>().ok());

        let staff = parts
            .headers
            .get(ACTOR_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|r| r.trim().eq_ignore_ascii_case("staff"))
            .unwrap_or(false);

        Ok(Actor { customer_id, staff })
    }
}

// ── Tests ──────────────────────────────────────────────────────
