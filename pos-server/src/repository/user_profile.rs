//! User Profile Repository
//!
//! Profile records are keyed by the identity the auth service resolves
//! (`user_profile:<auth id>`), so there is no generated identifier here.

use super::{RepoError, RepoResult};
use crate::store::KvStore;
use shared::models::{ProfileUpdate, UserProfile, UserUpdate};

const PREFIX: &str = "user_profile:";

#[derive(Clone)]
pub struct UserProfileRepository {
    store: KvStore,
}

impl UserProfileRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub fn key_for(user_id: &str) -> String {
        format!("{PREFIX}{user_id}")
    }

    pub fn find_by_user(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        Ok(self.store.get(&Self::key_for(user_id))?)
    }

    pub fn find_all(&self) -> RepoResult<Vec<UserProfile>> {
        Ok(self.store.get_by_prefix(PREFIX)?)
    }

    /// Self-service update: name/phone only, role untouchable
    pub fn update_profile(&self, user_id: &str, data: ProfileUpdate) -> RepoResult<UserProfile> {
        let key = Self::key_for(user_id);
        self.store.update(&key, |current: Option<UserProfile>| {
            let mut profile = current
                .ok_or_else(|| RepoError::NotFound(format!("Profile {user_id} not found")))?;

            if let Some(name) = data.name {
                profile.name = name;
            }
            if let Some(phone) = data.phone {
                profile.phone = phone;
            }
            profile.updated_at = Some(shared::util::now_millis());
            profile.updated_by = Some(user_id.to_string());
            Ok(profile)
        })
    }

    /// Administrative update: role/active plus deactivation bookkeeping
    pub fn update_user(
        &self,
        user_id: &str,
        data: UserUpdate,
        updated_by: String,
    ) -> RepoResult<UserProfile> {
        let key = Self::key_for(user_id);
        self.store.update(&key, |current: Option<UserProfile>| {
            let mut profile = current
                .ok_or_else(|| RepoError::NotFound(format!("User {user_id} not found")))?;

            let now = shared::util::now_millis();
            if let Some(name) = data.name {
                profile.name = name;
            }
            if let Some(phone) = data.phone {
                profile.phone = phone;
            }
            if let Some(role) = data.role {
                profile.role = role;
            }
            match data.active {
                Some(false) => {
                    profile.active = false;
                    profile.deactivation_note = data.deactivation_note.clone();
                    profile.deactivated_at = Some(now);
                    profile.deactivated_by = Some(updated_by.clone());
                }
                Some(true) => {
                    profile.active = true;
                    profile.deactivation_note = None;
                    profile.deactivated_at = None;
                    profile.deactivated_by = None;
                }
                None => {}
            }
            profile.updated_at = Some(now);
            profile.updated_by = Some(updated_by);
            Ok(profile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;

    fn seed(repo: &UserProfileRepository, user_id: &str) {
        let profile = UserProfile {
            id: UserProfileRepository::key_for(user_id),
            email: "cajero@globatech.com".to_string(),
            name: "María Cajera".to_string(),
            role: UserRole::Cashier,
            phone: String::new(),
            active: true,
            deactivation_note: None,
            deactivated_at: None,
            deactivated_by: None,
            created_at: shared::util::now_millis(),
            updated_at: None,
            updated_by: None,
        };
        repo.store.set(&profile.id, &profile).unwrap();
    }

    #[test]
    fn test_deactivate_then_reactivate_clears_bookkeeping() {
        let repo = UserProfileRepository::new(KvStore::open_in_memory().unwrap());
        seed(&repo, "u-1");

        let deactivated = repo
            .update_user(
                "u-1",
                UserUpdate {
                    name: None,
                    phone: None,
                    role: None,
                    active: Some(false),
                    deactivation_note: Some("Fin de contrato".to_string()),
                },
                "admin-1".to_string(),
            )
            .unwrap();
        assert!(!deactivated.active);
        assert!(deactivated.deactivated_at.is_some());
        assert_eq!(deactivated.deactivated_by.as_deref(), Some("admin-1"));

        let reactivated = repo
            .update_user(
                "u-1",
                UserUpdate {
                    name: None,
                    phone: None,
                    role: None,
                    active: Some(true),
                    deactivation_note: None,
                },
                "admin-1".to_string(),
            )
            .unwrap();
        assert!(reactivated.active);
        assert!(reactivated.deactivation_note.is_none());
        assert!(reactivated.deactivated_at.is_none());
    }

    #[test]
    fn test_profile_update_cannot_touch_role() {
        let repo = UserProfileRepository::new(KvStore::open_in_memory().unwrap());
        seed(&repo, "u-1");

        let updated = repo
            .update_profile(
                "u-1",
                ProfileUpdate {
                    name: Some("María C.".to_string()),
                    phone: Some("+57 300 333 4444".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.role, UserRole::Cashier);
        assert_eq!(updated.name, "María C.");
    }
}
