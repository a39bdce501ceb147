//! Users & profile API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::repository::UserProfileRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{ProfileUpdate, UserProfile, UserUpdate};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserProfile>,
}

/// GET /api/profile - the caller's own profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let profile = UserProfileRepository::new(state.store.clone())
        .find_by_user(&user.id)?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.id)))?;
    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}

/// PUT /api/profile - self-service profile update (role untouchable)
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<ProfileResponse>> {
    let profile =
        UserProfileRepository::new(state.store.clone()).update_profile(&user.id, payload)?;
    Ok(Json(ProfileResponse {
        success: true,
        profile,
    }))
}

/// GET /api/users - all user profiles (admin)
pub async fn list_users(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UsersResponse>> {
    user.require_admin()?;

    let users = UserProfileRepository::new(state.store.clone()).find_all()?;
    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

/// PUT /api/users/{id} - administrative update (activate/deactivate, role)
pub async fn update_user(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    user.require_admin()?;

    let updated =
        UserProfileRepository::new(state.store.clone()).update_user(&id, payload, user.id)?;
    Ok(Json(UserResponse {
        success: true,
        user: updated,
    }))
}
