//! Explicit schema registry.
//!
//! Every table of the CRM is listed here once, parents before children, with
//! the DDL that creates it. [`apply_schema`] runs the whole list in a single
//! transaction when the process starts. Statements use
//! `CREATE TABLE IF NOT EXISTS`, so applying the registry to an initialised
//! database is a no-op.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Whether a registry entry is an entity or a many-to-many link table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Entity,
    JoinTable,
}

/// A table definition known to the registry.
#[derive(Clone, Copy, Debug)]
pub struct EntityDefinition {
    pub name: &'static str,
    pub table: &'static str,
    pub kind: EntityKind,
    pub ddl: &'static str,
}

/// All tables, ordered so that every referenced table precedes its referrers.
pub static ENTITIES: &[EntityDefinition] = &[
    EntityDefinition {
        name: "UserProfile",
        table: "user_profiles",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS user_profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            user_id INTEGER NOT NULL UNIQUE CHECK (user_id > 0),
            name VARCHAR(64) NOT NULL
        );",
    },
    EntityDefinition {
        name: "Role",
        table: "roles",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS roles (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(32) NOT NULL UNIQUE
        );",
    },
    EntityDefinition {
        name: "Menu",
        table: "menus",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS menus (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(32) NOT NULL,
            url_name VARCHAR(64) NOT NULL
        );",
    },
    EntityDefinition {
        name: "UserProfileRole",
        table: "user_profile_roles",
        kind: EntityKind::JoinTable,
        ddl: "CREATE TABLE IF NOT EXISTS user_profile_roles (
            user_profile_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
            PRIMARY KEY (user_profile_id, role_id)
        );",
    },
    EntityDefinition {
        name: "RoleMenu",
        table: "role_menus",
        kind: EntityKind::JoinTable,
        ddl: "CREATE TABLE IF NOT EXISTS role_menus (
            role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
            menu_id INTEGER NOT NULL REFERENCES menus(id) ON DELETE CASCADE,
            PRIMARY KEY (role_id, menu_id)
        );",
    },
    EntityDefinition {
        name: "Course",
        table: "courses",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(64) NOT NULL UNIQUE,
            price SMALLINT NOT NULL CHECK (price BETWEEN 0 AND 32767),
            period SMALLINT NOT NULL CHECK (period BETWEEN 0 AND 32767),
            outline TEXT NOT NULL,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    },
    EntityDefinition {
        name: "Branch",
        table: "branches",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS branches (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(128) NOT NULL UNIQUE,
            addr VARCHAR(128) NOT NULL
        );",
    },
    EntityDefinition {
        name: "Tag",
        table: "tags",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(32) NOT NULL UNIQUE
        );",
    },
    EntityDefinition {
        name: "Customer",
        table: "customers",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name VARCHAR(32),
            qq VARCHAR(64) NOT NULL UNIQUE,
            qq_name VARCHAR(64),
            phone VARCHAR(32),
            source SMALLINT NOT NULL CHECK (source IN (0, 1, 2, 3, 4, 5, 6)),
            referral_from VARCHAR(64),
            consult_course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            consultant_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            note TEXT,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    },
    EntityDefinition {
        name: "CustomerTag",
        table: "customer_tags",
        kind: EntityKind::JoinTable,
        ddl: "CREATE TABLE IF NOT EXISTS customer_tags (
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (customer_id, tag_id)
        );",
    },
    EntityDefinition {
        name: "CustomerFollowUp",
        table: "customer_follow_ups",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS customer_follow_ups (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            consultant_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            intention SMALLINT NOT NULL CHECK (intention IN (0, 1, 2, 3, 4, 5)),
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    },
    EntityDefinition {
        name: "ClassList",
        table: "class_lists",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS class_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            semester SMALLINT NOT NULL CHECK (semester BETWEEN 0 AND 32767),
            branch_id INTEGER NOT NULL REFERENCES branches(id) ON DELETE CASCADE,
            class_type SMALLINT NOT NULL CHECK (class_type IN (0, 1, 2)),
            start_date DATE NOT NULL,
            end_date DATE,
            UNIQUE (branch_id, course_id, semester)
        );",
    },
    EntityDefinition {
        name: "ClassTeacher",
        table: "class_teachers",
        kind: EntityKind::JoinTable,
        ddl: "CREATE TABLE IF NOT EXISTS class_teachers (
            class_id INTEGER NOT NULL REFERENCES class_lists(id) ON DELETE CASCADE,
            user_profile_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            PRIMARY KEY (class_id, user_profile_id)
        );",
    },
    EntityDefinition {
        name: "CourseRecord",
        table: "course_records",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS course_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            class_id INTEGER NOT NULL REFERENCES class_lists(id) ON DELETE CASCADE,
            day_num SMALLINT NOT NULL CHECK (day_num BETWEEN 0 AND 32767),
            teacher_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            has_homework BOOLEAN NOT NULL DEFAULT 1,
            homework_title VARCHAR(128),
            homework_content TEXT,
            outline TEXT NOT NULL,
            date DATE NOT NULL DEFAULT CURRENT_DATE,
            UNIQUE (class_id, day_num)
        );",
    },
    EntityDefinition {
        name: "Enrollment",
        table: "enrollments",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS enrollments (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            class_id INTEGER NOT NULL REFERENCES class_lists(id) ON DELETE CASCADE,
            consultant_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            contract_agreed BOOLEAN NOT NULL DEFAULT 0,
            contract_approved BOOLEAN NOT NULL DEFAULT 0,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (customer_id, class_id)
        );",
    },
    EntityDefinition {
        name: "StudyRecord",
        table: "study_records",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS study_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            enrollment_id INTEGER NOT NULL REFERENCES enrollments(id) ON DELETE CASCADE,
            course_record_id INTEGER NOT NULL REFERENCES course_records(id) ON DELETE CASCADE,
            attendance SMALLINT NOT NULL DEFAULT 0 CHECK (attendance IN (0, 1, 2, 3)),
            score SMALLINT NOT NULL
                CHECK (score IN (100, 90, 85, 80, 75, 70, 60, 40, 0, -50, -100)),
            memo TEXT,
            date DATE NOT NULL DEFAULT CURRENT_DATE,
            UNIQUE (enrollment_id, course_record_id)
        );",
    },
    EntityDefinition {
        name: "Payment",
        table: "payments",
        kind: EntityKind::Entity,
        ddl: "CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            amount INTEGER NOT NULL DEFAULT 500 CHECK (amount >= 0),
            course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            consultant_id INTEGER NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    },
];

/// Looks up a registry entry by entity name (e.g. `"ClassList"`).
pub fn entity(name: &str) -> Option<&'static EntityDefinition> {
    ENTITIES.iter().find(|definition| definition.name == name)
}

/// Creates every registered table that does not exist yet.
pub fn apply_schema(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        for definition in ENTITIES {
            conn.batch_execute(definition.ddl)?;
            log::debug!("Registered {} ({})", definition.name, definition.table);
        }
        Ok(())
    })
}
