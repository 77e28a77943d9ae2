use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use institute_crm::registry::{self, ENTITIES};

mod common;

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = BigInt)]
    foreign_keys: i64,
}

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

#[test]
fn test_initialize_creates_every_registered_table() {
    let test_db = common::TestDb::new("test_initialize_creates_tables.db");
    let mut conn = test_db.conn();

    for definition in ENTITIES {
        let found = diesel::sql_query(format!(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = '{}'",
            definition.table
        ))
        .get_result::<Count>(&mut conn)
        .expect("query sqlite_master");
        assert_eq!(found.count, 1, "missing table {}", definition.table);
    }
}

#[test]
fn test_schema_can_be_applied_again() {
    let test_db = common::TestDb::new("test_schema_reapplied.db");
    let mut conn = test_db.conn();

    registry::apply_schema(&mut conn).expect("second application");
}

#[test]
fn test_connections_enforce_foreign_keys_and_wal() {
    let test_db = common::TestDb::new("test_connection_pragmas.db");
    let mut conn = test_db.conn();

    let fk = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeys>(&mut conn)
        .expect("read foreign_keys pragma");
    assert_eq!(fk.foreign_keys, 1);

    let mode = diesel::sql_query("PRAGMA journal_mode")
        .get_result::<JournalMode>(&mut conn)
        .expect("read journal_mode pragma");
    assert_eq!(mode.journal_mode.to_lowercase(), "wal");
}
