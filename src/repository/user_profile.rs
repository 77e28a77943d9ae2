//! Staff profiles, roles and the menus roles grant access to.

use diesel::prelude::*;

use crate::domain::types::{AuthUserId, MenuId, RoleId, UserProfileId};
use crate::domain::user_profile::{Menu, NewMenu, NewRole, NewUserProfile, Role, UserProfile};
use crate::models::user_profile::{
    Menu as DbMenu, NewMenu as DbNewMenu, NewRole as DbNewRole,
    NewUserProfile as DbNewUserProfile, Role as DbRole, RoleMenu as DbRoleMenu,
    UserProfile as DbUserProfile, UserProfileRole as DbUserProfileRole,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, RoleReader, RoleWriter, UserProfileReader, UserProfileWriter,
    expect_deleted, into_domain, unique_ids,
};

impl UserProfileReader for DieselRepository {
    fn get_user_profile_by_id(&self, id: UserProfileId) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let profile = user_profiles::table
            .find(id.get())
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        profile
            .map(|p| UserProfile::try_from(p).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_user_profile_by_user_id(
        &self,
        user_id: AuthUserId,
    ) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let profile = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.get()))
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        profile
            .map(|p| UserProfile::try_from(p).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_user_profiles(&self) -> RepositoryResult<Vec<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let rows = user_profiles::table
            .order(user_profiles::name.asc())
            .load::<DbUserProfile>(&mut conn)?;

        into_domain(rows)
    }

    fn list_user_roles(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Role>> {
        use crate::schema::{roles, user_profile_roles};

        let mut conn = self.conn()?;
        let rows = roles::table
            .inner_join(user_profile_roles::table)
            .filter(user_profile_roles::user_profile_id.eq(profile_id.get()))
            .select(roles::all_columns)
            .order(roles::id.asc())
            .load::<DbRole>(&mut conn)?;

        into_domain(rows)
    }

    fn list_menus_for_user(&self, profile_id: UserProfileId) -> RepositoryResult<Vec<Menu>> {
        use crate::schema::{menus, role_menus, user_profile_roles};

        let mut conn = self.conn()?;

        let role_ids = user_profile_roles::table
            .filter(user_profile_roles::user_profile_id.eq(profile_id.get()))
            .select(user_profile_roles::role_id)
            .load::<i32>(&mut conn)?;

        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = menus::table
            .inner_join(role_menus::table)
            .filter(role_menus::role_id.eq_any(role_ids))
            .select(menus::all_columns)
            .distinct()
            .order(menus::id.asc())
            .load::<DbMenu>(&mut conn)?;

        into_domain(rows)
    }
}

impl UserProfileWriter for DieselRepository {
    fn create_user_profile(&self, new_profile: &NewUserProfile) -> RepositoryResult<UserProfile> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let insertable: DbNewUserProfile = new_profile.into();

        let row = diesel::insert_into(user_profiles::table)
            .values(&insertable)
            .get_result::<DbUserProfile>(&mut conn)?;

        UserProfile::try_from(row).map_err(RepositoryError::from)
    }

    fn update_user_profile(
        &self,
        profile_id: UserProfileId,
        updates: &NewUserProfile,
    ) -> RepositoryResult<UserProfile> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let changeset: DbNewUserProfile = updates.into();

        let row = diesel::update(user_profiles::table.find(profile_id.get()))
            .set(&changeset)
            .get_result::<DbUserProfile>(&mut conn)?;

        UserProfile::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_user_profile(&self, profile_id: UserProfileId) -> RepositoryResult<()> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(user_profiles::table.find(profile_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn set_user_roles(
        &self,
        profile_id: UserProfileId,
        role_ids: &[RoleId],
    ) -> RepositoryResult<usize> {
        use crate::schema::user_profile_roles;

        let mut conn = self.conn()?;

        let links = unique_ids(role_ids)
            .into_iter()
            .map(|role_id| DbUserProfileRole {
                user_profile_id: profile_id.get(),
                role_id: role_id.get(),
            })
            .collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(move |conn| {
            diesel::delete(
                user_profile_roles::table
                    .filter(user_profile_roles::user_profile_id.eq(profile_id.get())),
            )
            .execute(conn)?;

            if links.is_empty() {
                return Ok(0);
            }

            diesel::insert_into(user_profile_roles::table)
                .values(links)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}

impl RoleReader for DieselRepository {
    fn get_role_by_id(&self, id: RoleId) -> RepositoryResult<Option<Role>> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let role = roles::table
            .find(id.get())
            .first::<DbRole>(&mut conn)
            .optional()?;

        role.map(|r| Role::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_menu_by_id(&self, id: MenuId) -> RepositoryResult<Option<Menu>> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let menu = menus::table
            .find(id.get())
            .first::<DbMenu>(&mut conn)
            .optional()?;

        menu.map(|m| Menu::try_from(m).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_roles(&self) -> RepositoryResult<Vec<Role>> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let rows = roles::table
            .order(roles::id.asc())
            .load::<DbRole>(&mut conn)?;

        into_domain(rows)
    }

    fn list_menus(&self) -> RepositoryResult<Vec<Menu>> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let rows = menus::table
            .order(menus::id.asc())
            .load::<DbMenu>(&mut conn)?;

        into_domain(rows)
    }

    fn list_role_menus(&self, role_id: RoleId) -> RepositoryResult<Vec<Menu>> {
        use crate::schema::{menus, role_menus};

        let mut conn = self.conn()?;
        let rows = menus::table
            .inner_join(role_menus::table)
            .filter(role_menus::role_id.eq(role_id.get()))
            .select(menus::all_columns)
            .order(menus::id.asc())
            .load::<DbMenu>(&mut conn)?;

        into_domain(rows)
    }
}

impl RoleWriter for DieselRepository {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let insertable: DbNewRole = new_role.into();

        let row = diesel::insert_into(roles::table)
            .values(&insertable)
            .get_result::<DbRole>(&mut conn)?;

        Role::try_from(row).map_err(RepositoryError::from)
    }

    fn update_role(&self, role_id: RoleId, updates: &NewRole) -> RepositoryResult<Role> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let changeset: DbNewRole = updates.into();

        let row = diesel::update(roles::table.find(role_id.get()))
            .set(&changeset)
            .get_result::<DbRole>(&mut conn)?;

        Role::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_role(&self, role_id: RoleId) -> RepositoryResult<()> {
        use crate::schema::roles;

        let mut conn = self.conn()?;
        let affected = diesel::delete(roles::table.find(role_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn create_menu(&self, new_menu: &NewMenu) -> RepositoryResult<Menu> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let insertable: DbNewMenu = new_menu.into();

        let row = diesel::insert_into(menus::table)
            .values(&insertable)
            .get_result::<DbMenu>(&mut conn)?;

        Menu::try_from(row).map_err(RepositoryError::from)
    }

    fn update_menu(&self, menu_id: MenuId, updates: &NewMenu) -> RepositoryResult<Menu> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let changeset: DbNewMenu = updates.into();

        let row = diesel::update(menus::table.find(menu_id.get()))
            .set(&changeset)
            .get_result::<DbMenu>(&mut conn)?;

        Menu::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_menu(&self, menu_id: MenuId) -> RepositoryResult<()> {
        use crate::schema::menus;

        let mut conn = self.conn()?;
        let affected = diesel::delete(menus::table.find(menu_id.get())).execute(&mut conn)?;

        expect_deleted(affected)
    }

    fn set_role_menus(&self, role_id: RoleId, menu_ids: &[MenuId]) -> RepositoryResult<usize> {
        use crate::schema::role_menus;

        let mut conn = self.conn()?;

        let links = unique_ids(menu_ids)
            .into_iter()
            .map(|menu_id| DbRoleMenu {
                role_id: role_id.get(),
                menu_id: menu_id.get(),
            })
            .collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(move |conn| {
            diesel::delete(role_menus::table.filter(role_menus::role_id.eq(role_id.get())))
                .execute(conn)?;

            if links.is_empty() {
                return Ok(0);
            }

            diesel::insert_into(role_menus::table)
                .values(links)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }
}
