//! Staff accounts and the role/menu permission model.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AuthUserId, MenuId, MenuName, MenuUrlName, ProfileName, RoleId, RoleName, UserProfileId,
};

/// Internal staff account, one per authentication identity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserProfileId,
    pub user_id: AuthUserId,
    pub name: ProfileName,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewUserProfile {
    pub user_id: AuthUserId,
    pub name: ProfileName,
}

impl NewUserProfile {
    #[must_use]
    pub fn new(user_id: AuthUserId, name: ProfileName) -> Self {
        Self { user_id, name }
    }
}

/// Named bundle of menus granted to profiles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewRole {
    pub name: RoleName,
}

impl NewRole {
    #[must_use]
    pub fn new(name: RoleName) -> Self {
        Self { name }
    }
}

/// Navigable UI route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Menu {
    pub id: MenuId,
    pub name: MenuName,
    pub url_name: MenuUrlName,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewMenu {
    pub name: MenuName,
    pub url_name: MenuUrlName,
}

impl NewMenu {
    #[must_use]
    pub fn new(name: MenuName, url_name: MenuUrlName) -> Self {
        Self { name, url_name }
    }
}
