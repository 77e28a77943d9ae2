//! Navigation menus granted to staff through their roles.

use crate::domain::types::AuthUserId;
use crate::domain::user_profile::Menu;
use crate::repository::UserProfileReader;
use crate::services::{ServiceError, ServiceResult};

/// Resolves the menus an authenticated user may see.
///
/// The result is the union of the menus of every role on the user's
/// profile, without duplicates and ordered by menu id. Users without a
/// profile get [`ServiceError::NotFound`].
pub fn menus_for_user<R>(repo: &R, user_id: AuthUserId) -> ServiceResult<Vec<Menu>>
where
    R: UserProfileReader + ?Sized,
{
    let profile = repo
        .get_user_profile_by_user_id(user_id)?
        .ok_or_else(|| {
            log::warn!("No staff profile for user {user_id}");
            ServiceError::NotFound
        })?;

    repo.list_menus_for_user(profile.id).map_err(|err| {
        log::error!("Failed to load menus for profile {}: {err}", profile.id);
        ServiceError::from(err)
    })
}
