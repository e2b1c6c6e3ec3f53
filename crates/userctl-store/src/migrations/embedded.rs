//! Migrations compiled into the binary with include_str!

/// One forward-only schema step
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations, in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_users",
        sql: include_str!("../../migrations/001_create_users.sql"),
    }]
}
