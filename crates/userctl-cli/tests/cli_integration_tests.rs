//! CLI integration tests
//!
//! Run the built `userctl` binary against a scratch database and check
//! stdout, stderr, exit status, and the resulting rows.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("users.db")
}

fn userctl(temp_dir: &TempDir, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_userctl"))
        .current_dir(temp_dir.path())
        .env_remove("USERCTL_DB")
        .env_remove("USERCTL_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn initialized(temp_dir: &TempDir) -> PathBuf {
    let db = db_path(temp_dir);
    let output = userctl(temp_dir, &db, &["initialize"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Database Initialized\n");
    db
}

fn count_rows(db: &Path, username: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(
        "SELECT COUNT(*) FROM users WHERE username = ?1",
        [username],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn test_initialize_then_get_user_bob() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["get-user", "bob"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_initialize_twice_resets_to_single_seed_user() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);
    let created = userctl(
        &temp_dir,
        &db,
        &["create-user", "carol", "carol@mail.com", "pw"],
    );
    assert!(created.status.success());

    initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["get-all-users"]);
    assert_eq!(
        stdout(&output),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_create_user_twice_reports_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let first = userctl(
        &temp_dir,
        &db,
        &["create-user", "alice", "alice@mail.com", "secret"],
    );
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(
        stdout(&first),
        "id=2 username='alice' email='alice@mail.com'\n"
    );

    let second = userctl(
        &temp_dir,
        &db,
        &["create-user", "alice", "other@mail.com", "secret"],
    );
    assert!(second.status.success());
    assert_eq!(stdout(&second), "Username or email already taken!\n");
    assert_eq!(count_rows(&db, "alice"), 1);
}

#[test]
fn test_create_user_stores_hash_not_password() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    userctl(
        &temp_dir,
        &db,
        &["create-user", "alice", "alice@mail.com", "secret"],
    );

    let conn = Connection::open(&db).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT password FROM users WHERE username = 'alice'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_ne!(stored, "secret");
    assert!(stored.starts_with("$argon2id$"));
}

#[test]
fn test_create_user_with_empty_username_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["create-user", "  ", "x@mail.com", "pw"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn test_delete_then_get_finds_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let deleted = userctl(&temp_dir, &db, &["delete-user", "bob"]);
    assert!(deleted.status.success());
    assert_eq!(stdout(&deleted), "bob deleted\n");

    let output = userctl(&temp_dir, &db, &["get-user", "bob"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No users found\n");
}

#[test]
fn test_delete_missing_user_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["delete-user", "ghost"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ghost not found! Unable to delete user.\n");
}

#[test]
fn test_change_email_missing_user_leaves_store_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["change-email", "ghost", "g@mail.com"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "ghost not found! Unable to update email.\n"
    );
    let all = userctl(&temp_dir, &db, &["get-all-users"]);
    assert_eq!(
        stdout(&all),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_change_email_updates_row() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["change-email", "bob", "robert@mail.com"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Updated bob's email to robert@mail.com\n");
    let found = userctl(&temp_dir, &db, &["get-user", "robert"]);
    assert_eq!(
        stdout(&found),
        "id=1 username='bob' email='robert@mail.com'\n"
    );
}

#[test]
fn test_change_email_to_taken_email_reports_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);
    userctl(
        &temp_dir,
        &db,
        &["create-user", "alice", "alice@mail.com", "secret"],
    );

    let output = userctl(&temp_dir, &db, &["change-email", "bob", "alice@mail.com"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Username or email already taken!\n");
    let found = userctl(&temp_dir, &db, &["get-user", "bob"]);
    assert_eq!(
        stdout(&found),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_pagination_pages_are_disjoint() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);
    userctl(
        &temp_dir,
        &db,
        &["create-user", "alice", "alice@mail.com", "secret"],
    );

    let first = userctl(&temp_dir, &db, &["get-all-users", "--limit", "1", "--offset", "0"]);
    let second = userctl(&temp_dir, &db, &["get-all-users", "--limit", "1", "--offset", "1"]);

    assert_eq!(
        stdout(&first),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
    assert_eq!(
        stdout(&second),
        "id=2 username='alice' email='alice@mail.com'\n"
    );
}

#[test]
fn test_get_user_matches_email_substring() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["get-user", "mail.com"]);

    assert_eq!(
        stdout(&output),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_unopenable_database_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file
    let db = temp_dir.path().to_path_buf();

    let output = userctl(&temp_dir, &db, &["get-all-users"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn test_database_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("nested").join("dir").join("users.db");

    let output = userctl(&temp_dir, &db, &["initialize"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(db.exists());
}

#[test]
fn test_initialize_replaces_foreign_users_table() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch("CREATE TABLE users (legacy TEXT)").unwrap();
    }

    let output = userctl(&temp_dir, &db, &["initialize"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Database Initialized\n");
    let found = userctl(&temp_dir, &db, &["get-user", "bob"]);
    assert_eq!(
        stdout(&found),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_initialize_recovers_from_checksum_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute("UPDATE schema_version SET checksum = 'bad'", [])
            .unwrap();
    }

    let rejected = userctl(&temp_dir, &db, &["get-all-users"]);
    assert!(!rejected.status.success());
    assert!(stderr(&rejected).contains("Checksum mismatch"));

    initialized(&temp_dir);

    let output = userctl(&temp_dir, &db, &["get-all-users"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "id=1 username='bob' email='bob@mail.com'\n"
    );
}

#[test]
fn test_store_failure_prints_single_plain_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().to_path_buf();

    let output = userctl(&temp_dir, &db, &["get-all-users"]);

    let err = stderr(&output);
    assert_eq!(err.lines().count(), 1, "stderr: {}", err);
    assert!(err.starts_with("Error: ERR_PERSISTENCE"));
    assert!(err.contains("request_id="));
    assert!(!err.contains('\u{1b}'), "no ANSI escapes when not a terminal");
}

#[test]
fn test_padded_username_is_found_for_delete() {
    let temp_dir = TempDir::new().unwrap();
    let db = initialized(&temp_dir);
    let created = userctl(
        &temp_dir,
        &db,
        &["create-user", " alice", "alice@mail.com", "secret"],
    );
    assert_eq!(
        stdout(&created),
        "id=2 username='alice' email='alice@mail.com'\n"
    );

    let deleted = userctl(&temp_dir, &db, &["delete-user", " alice"]);

    assert_eq!(stdout(&deleted), "alice deleted\n");
    assert_eq!(count_rows(&db, "alice"), 0);
}
