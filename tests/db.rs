use stormdesk::db::run_migrations;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let path = {
        let test_db = common::TestDb::new("test_connection.db");
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(test_db.path().exists());
        test_db.path().to_path_buf()
    };

    assert!(!path.exists());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations.db");

    let applied = run_migrations(&test_db.pool()).expect("migrations rerun");
    assert_eq!(applied, 0);
}
