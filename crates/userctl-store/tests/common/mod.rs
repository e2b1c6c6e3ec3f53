use userctl_core::model::NewUser;
use userctl_store::{MutationOutcome, Session};

/// Empty in-memory store with the schema applied
#[allow(dead_code)]
pub fn new_session() -> Session {
    Session::open_in_memory().expect("in-memory session")
}

/// Unsaved user with a placeholder hash
///
/// Skips Argon2 so tests that only exercise the gateway stay fast; the
/// real hashing path is covered separately.
#[allow(dead_code)]
pub fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: format!("$argon2id$placeholder${}", username),
    }
}

/// Insert and return the stored user, panicking on a duplicate
#[allow(dead_code)]
pub fn insert_user(session: &mut Session, username: &str, email: &str) -> userctl_core::User {
    match session.insert(new_user(username, email)).unwrap() {
        MutationOutcome::Applied(user) => user,
        other => panic!("expected insert of {} to apply, got {:?}", username, other),
    }
}

#[allow(dead_code)]
pub fn count_users(session: &Session) -> i64 {
    session
        .connection()
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}
