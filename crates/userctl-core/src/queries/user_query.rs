use crate::model::User;

/// Queryable user columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
        }
    }

    fn value<'a>(&self, user: &'a User) -> &'a str {
        match self {
            Field::Username => &user.username,
            Field::Email => &user.email,
        }
    }
}

/// A single condition on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive equality
    Exact(Field, String),
    /// Substring match, case-insensitive for ASCII letters only
    Contains(Field, String),
}

impl Predicate {
    pub fn field(&self) -> Field {
        match self {
            Predicate::Exact(field, _) | Predicate::Contains(field, _) => *field,
        }
    }

    /// Evaluate against an in-memory user with the same semantics the
    /// store applies (SQLite `=` and `LIKE`).
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Predicate::Exact(field, value) => field.value(user) == value,
            Predicate::Contains(field, needle) => field
                .value(user)
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }
}

/// Offset/limit window over rows in id order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Predicates OR-ed together, optionally paginated
///
/// An empty predicate list selects every row.
///
/// ```
/// use userctl_core::queries::{Field, Predicate, UserQuery};
///
/// let q = UserQuery::search("em");
/// assert_eq!(q.predicates().len(), 2);
/// assert_eq!(q.predicates()[1], Predicate::Contains(Field::Email, "em".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    any_of: Vec<Predicate>,
    page: Option<Page>,
}

impl UserQuery {
    /// Every user, unpaginated
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matching(predicate: Predicate) -> Self {
        Self {
            any_of: vec![predicate],
            page: None,
        }
    }

    /// Exact username lookup
    ///
    /// The key is trimmed, as `NewUser` trims usernames before storing them.
    pub fn by_username(username: &str) -> Self {
        Self::matching(Predicate::Exact(Field::Username, username.trim().to_string()))
    }

    /// Username OR email contains `term`
    pub fn search(term: &str) -> Self {
        Self::matching(Predicate::Contains(Field::Username, term.to_string()))
            .or(Predicate::Contains(Field::Email, term.to_string()))
    }

    /// Add an alternative predicate
    pub fn or(mut self, predicate: Predicate) -> Self {
        self.any_of.push(predicate);
        self
    }

    pub fn paged(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.any_of
    }

    pub fn page(&self) -> Option<Page> {
        self.page
    }

    /// In-memory counterpart of the SQL `WHERE` clause
    pub fn matches(&self, user: &User) -> bool {
        self.any_of.is_empty() || self.any_of.iter().any(|p| p.matches(user))
    }
}
