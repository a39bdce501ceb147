//! Identity boundary
//!
//! Authentication lives in an external service that terminates the bearer
//! credential and forwards the resolved identity as trusted headers. By
//! the time a request reaches a handler the credential checks have
//! already passed; this module only materializes that identity.
//!
//! | Header | Content |
//! |--------|---------|
//! | `x-user-id` | Resolved user id (required) |
//! | `x-user-name` | Display name |
//! | `x-user-role` | Role, e.g. `administrator`, `cashier` |

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::utils::AppError;
use shared::models::UserRole;

/// Identity attached to the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

impl CurrentUser {
    /// Administrative endpoints require the administrator role
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Some(role) if role.is_admin() => Ok(()),
            _ => Err(AppError::Forbidden(
                "Administrator role required".to_string(),
            )),
        }
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let Some(id) = header("x-user-id").filter(|id| !id.is_empty()) else {
            tracing::warn!(uri = %parts.uri, "Request without resolved identity");
            return Err(AppError::Unauthorized);
        };

        let user = CurrentUser {
            id,
            name: header("x-user-name"),
            role: header("x-user-role").and_then(|r| UserRole::parse(&r)),
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
