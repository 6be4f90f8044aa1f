// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use tempfile::TempDir;

use super::{create_test_draft, create_test_persistence};
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = create_test_persistence();
    let mut db2 = create_test_persistence();

    db1.insert_bike(&create_test_draft("Trek", "Domane")).unwrap();
    db1.create_user("alice", "secret").unwrap();

    assert_eq!(db1.list_bikes().unwrap().len(), 1);
    assert_eq!(db2.list_bikes().unwrap().len(), 0, "db2 should not see db1's bikes");
    assert_eq!(db1.count_users().unwrap(), 1);
    assert_eq!(db2.count_users().unwrap(), 0, "db2 should not see db1's users");
}

#[test]
fn test_fresh_database_is_empty() {
    let mut persistence = create_test_persistence();

    assert!(persistence.list_bikes().unwrap().is_empty());
    assert_eq!(persistence.count_users().unwrap(), 0);
}

#[test]
fn test_file_database_keeps_data_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.db");

    {
        let mut persistence = Persistence::new_with_file(&path)
            .unwrap()
            .with_password_cost(4 /* bcrypt minimum cost */);
        persistence
            .insert_bike(&create_test_draft("Giant", "Defy"))
            .unwrap();
        persistence.create_user("alice", "secret").unwrap();
    }

    // Reopening runs the migrations again; they must not drop anything.
    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let bikes = reopened.list_bikes().unwrap();

    assert_eq!(bikes.len(), 1);
    assert_eq!(bikes[0].brand, "Giant");
    assert!(reopened.get_user_by_username("alice").unwrap().is_some());
}

#[test]
fn test_file_database_uses_wal_journal() {
    use diesel::sql_types::Text;
    use diesel::{QueryableByName, RunQueryDsl};

    use crate::backend::sqlite::{Storage, ensure_foreign_keys, open};

    #[derive(QueryableByName)]
    struct JournalMode {
        #[diesel(sql_type = Text)]
        journal_mode: String,
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventory.db");

    let mut conn = open(Storage::File(path.to_str().unwrap())).unwrap();
    let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(mode.journal_mode.to_lowercase(), "wal");
    assert!(ensure_foreign_keys(&mut conn).is_ok());
}
