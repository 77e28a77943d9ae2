//! Diesel models representing staff profiles, roles and menus.

use diesel::prelude::*;

use crate::domain::types::{
    AuthUserId, MenuId, MenuName, MenuUrlName, ProfileName, RoleId, RoleName,
    TypeConstraintError, UserProfileId,
};
use crate::domain::user_profile::{
    Menu as DomainMenu, NewMenu as DomainNewMenu, NewRole as DomainNewRole,
    NewUserProfile as DomainNewUserProfile, Role as DomainRole, UserProfile as DomainUserProfile,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct UserProfile {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_profiles)]
pub struct NewUserProfile<'a> {
    pub user_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::roles)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::roles)]
pub struct NewRole<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::menus)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub url_name: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::menus)]
pub struct NewMenu<'a> {
    pub name: &'a str,
    pub url_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Associations, Identifiable, Insertable)]
#[diesel(primary_key(user_profile_id, role_id))]
#[diesel(belongs_to(UserProfile, foreign_key = user_profile_id))]
#[diesel(belongs_to(Role, foreign_key = role_id))]
#[diesel(table_name = crate::schema::user_profile_roles)]
/// Association table linking profiles to roles.
pub struct UserProfileRole {
    pub user_profile_id: i32,
    pub role_id: i32,
}

#[derive(Debug, Clone, Queryable, Associations, Identifiable, Insertable)]
#[diesel(primary_key(role_id, menu_id))]
#[diesel(belongs_to(Role, foreign_key = role_id))]
#[diesel(belongs_to(Menu, foreign_key = menu_id))]
#[diesel(table_name = crate::schema::role_menus)]
/// Association table linking roles to menus.
pub struct RoleMenu {
    pub role_id: i32,
    pub menu_id: i32,
}

impl TryFrom<UserProfile> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserProfileId::try_from(profile.id)?,
            user_id: AuthUserId::try_from(profile.user_id)?,
            name: ProfileName::new(profile.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewUserProfile> for NewUserProfile<'a> {
    fn from(profile: &'a DomainNewUserProfile) -> Self {
        Self {
            user_id: profile.user_id.get(),
            name: profile.name.as_str(),
        }
    }
}

impl TryFrom<Role> for DomainRole {
    type Error = TypeConstraintError;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId::try_from(role.id)?,
            name: RoleName::new(role.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewRole> for NewRole<'a> {
    fn from(role: &'a DomainNewRole) -> Self {
        Self {
            name: role.name.as_str(),
        }
    }
}

impl TryFrom<Menu> for DomainMenu {
    type Error = TypeConstraintError;

    fn try_from(menu: Menu) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MenuId::try_from(menu.id)?,
            name: MenuName::new(menu.name)?,
            url_name: MenuUrlName::new(menu.url_name)?,
        })
    }
}

impl<'a> From<&'a DomainNewMenu> for NewMenu<'a> {
    fn from(menu: &'a DomainNewMenu) -> Self {
        Self {
            name: menu.name.as_str(),
            url_name: menu.url_name.as_str(),
        }
    }
}
