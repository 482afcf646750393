// SPDX-License-Identifier: Apache-2.0

//! SQLite-backed user store.
//!
//! Tables:
//! - `users`: id, username (unique), password, email (unique), is_admin, created_at
//! - `notes`: id, user_id -> users.id, title, content, created_at
//!
//! Every statement is parameter-bound and auto-committed on its own.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::Result;
use crate::config::SeedConfig;
use crate::credential::hash_password;
use crate::error::LabError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    email TEXT NOT NULL,
    is_admin INTEGER DEFAULT 0,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    title TEXT NOT NULL,
    content TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users (id)
);
";

/// Message returned for any unique-constraint violation on `users`.
pub const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists";

/// A well-known account created at initialization.
struct SeedAccount {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    is_admin: bool,
    notes: &'static [(&'static str, &'static str)],
}

const SEED_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        username: "admin",
        password: "admin123",
        email: "admin@example.com",
        is_admin: true,
        notes: &[
            (
                "Welcome Note",
                "Welcome to the dashboard! This is a sample note.",
            ),
            (
                "Security Reminder",
                "Remember to change your default password.",
            ),
        ],
    },
    SeedAccount {
        username: "user",
        password: "password",
        email: "user@example.com",
        is_admin: false,
        notes: &[(
            "My First Note",
            "This is my private note that only I should be able to see.",
        )],
    },
];

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Row id.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
}

/// Full user row, including the stored credential.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Row id.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// Stored credential string.
    pub password: String,
    /// Unique email address.
    pub email: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Creation timestamp as stored by `SQLite`.
    pub created_at: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
        }
    }
}

/// Fields for a new account. `password` must already be a credential string.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Stored credential string.
    pub password: String,
    /// Administrator flag.
    pub is_admin: bool,
}

/// A note owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Row id.
    pub id: i64,
    /// Owning user id.
    pub user_id: i64,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: Option<String>,
}

/// Cloneable handle to the `SQLite` user store.
#[derive(Clone)]
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").finish_non_exhaustive()
    }
}

impl UserStore {
    /// Open (or create) the database at `path`, creating its parent directory.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the schema and, when enabled, the default accounts.
    ///
    /// Safe to call on every start: existing tables and accounts are kept.
    pub fn initialize(&self, seed: &SeedConfig) -> Result<()> {
        self.conn.lock().execute_batch(SCHEMA)?;
        tracing::debug!("Database schema ready");

        if seed.enabled {
            for account in &SEED_ACCOUNTS {
                self.seed_account(account)?;
            }
        }
        Ok(())
    }

    fn seed_account(&self, account: &SeedAccount) -> Result<()> {
        if self.find_by_username(account.username)?.is_some() {
            tracing::debug!(username = account.username, "Seed account already exists");
            return Ok(());
        }

        let user = self.insert_user(&NewUser {
            username: account.username.to_string(),
            email: account.email.to_string(),
            password: hash_password(account.password),
            is_admin: account.is_admin,
        })?;

        let conn = self.conn.lock();
        for (title, content) in account.notes {
            conn.execute(
                "INSERT INTO notes (user_id, title, content) VALUES (?1, ?2, ?3)",
                params![user.id, title, content],
            )?;
        }
        tracing::info!(username = account.username, "Default account created");
        Ok(())
    }

    /// Look up a user by exact username.
    pub fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn.lock();
        let record = conn
            .query_row(
                "SELECT id, username, password, email, is_admin, created_at
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                        email: row.get(3)?,
                        is_admin: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
                        created_at: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Insert a new user.
    ///
    /// A duplicate username or email becomes [`LabError::Conflict`].
    pub fn insert_user(&self, user: &NewUser) -> Result<User> {
        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO users (username, password, email, is_admin) VALUES (?1, ?2, ?3, ?4)",
            params![user.username, user.password, user.email, i64::from(user.is_admin)],
        );

        match result {
            Ok(_) => Ok(User {
                id: conn.last_insert_rowid(),
                username: user.username.clone(),
                email: user.email.clone(),
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(LabError::conflict(DUPLICATE_USER_MESSAGE))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Count registered users.
    pub fn user_count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// List notes owned by `user_id`, oldest first.
    pub fn notes_for_user(&self, user_id: i64) -> Result<Vec<Note>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, content FROM notes WHERE user_id = ?1 ORDER BY id",
        )?;
        let notes = stmt
            .query_map(params![user_id], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}
