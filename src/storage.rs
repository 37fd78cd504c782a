//! `SQLite` storage for the emoji alias database.
//!
//! The artifact is a single-file database holding exactly one table,
//! `gemoji`, keyed by alias. Writes happen once, at build time, inside a
//! single transaction; every later consumer opens the file read-only.

use crate::error::{EmojidbError, Result};
use crate::model::{AliasRow, DbStats};
use rusqlite::{Connection, OpenFlags, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The one table consumers query. No metadata or migration tables exist;
/// the schema is recreated from scratch on every build.
const SCHEMA: &str = "
    CREATE TABLE gemoji (
        alias TEXT NOT NULL PRIMARY KEY,
        emoji TEXT
    );
";

/// `SQLite` storage manager.
#[derive(Debug)]
pub struct Storage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Storage {
    /// Create a fresh database at the given path, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if the old file cannot be removed, the parent
    /// directory cannot be created, or the database cannot be initialized.
    pub fn create(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| EmojidbError::path_error("remove", db_path, e))?;
            debug!("Removed previous database at {}", db_path.display());
        }
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| EmojidbError::path_error("create directory for", db_path, e))?;
        }

        let conn = Connection::open(db_path)?;

        // Keep the journal in memory so no -wal/-shm siblings outlive the
        // build; the output must stay a single distributable file.
        conn.execute_batch(
            "
            PRAGMA journal_mode = MEMORY;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;
        conn.execute_batch(SCHEMA)?;

        info!("Created empty alias database at {}", db_path.display());
        Ok(Self {
            conn,
            path: Some(db_path.to_path_buf()),
        })
    }

    /// Open an existing database read-only.
    ///
    /// # Errors
    ///
    /// Returns [`EmojidbError::DatabaseNotFound`] if no file exists at the
    /// path, or a database error if the file cannot be opened.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if !db_path.exists() {
            return Err(EmojidbError::database_not_found(db_path));
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        debug!("Opened alias database at {}", db_path.display());
        Ok(Self {
            conn,
            path: Some(db_path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be initialized.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path: None })
    }

    /// Get a reference to the underlying database connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert alias rows inside a single transaction.
    ///
    /// Either every row lands or none do: the first failing insert rolls the
    /// transaction back. A primary-key collision is reported as
    /// [`EmojidbError::DuplicateAlias`] naming the offending alias.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails or the commit fails.
    pub fn insert_rows(&mut self, rows: &[AliasRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut count = 0;

        {
            let mut stmt = tx.prepare("INSERT INTO gemoji (alias, emoji) VALUES (?, ?)")?;
            for row in rows {
                stmt.execute(params![row.alias, row.emoji])
                    .map_err(|e| map_insert_error(e, &row.alias))?;
                count += 1;
            }
        }

        tx.commit()?;
        info!("Stored {} alias rows", count);
        Ok(count)
    }

    /// Look up the emoji stored for an alias.
    ///
    /// Returns `Ok(None)` when the alias has no row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_emoji(&self, alias: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT emoji FROM gemoji WHERE alias = ?",
            params![alias],
            |row| row.get::<_, Option<String>>(0),
        );

        match result {
            Ok(emoji) => Ok(emoji),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List every stored alias in lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn aliases(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT alias FROM gemoji ORDER BY alias")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut aliases = Vec::new();
        for alias in rows {
            aliases.push(alias?);
        }
        Ok(aliases)
    }

    /// Count rows in the `gemoji` table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_rows(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM gemoji", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Aggregate statistics over the stored table.
    ///
    /// The longest alias is measured in characters; ties go to the earliest
    /// inserted row, matching the order the build preserved from the source.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn stats(&self) -> Result<DbStats> {
        let (aliases, emojis) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT emoji) FROM gemoji",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let longest = self.conn.query_row(
            "SELECT alias FROM gemoji ORDER BY length(alias) DESC, rowid ASC LIMIT 1",
            [],
            |row| row.get(0),
        );
        let longest_alias = match longest {
            Ok(alias) => Some(alias),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        let db_size_bytes = self
            .path
            .as_deref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map_or(0, |m| m.len());

        Ok(DbStats {
            aliases,
            emojis,
            longest_alias,
            db_size_bytes,
        })
    }
}

fn map_insert_error(err: rusqlite::Error, alias: &str) -> EmojidbError {
    match err {
        rusqlite::Error::SqliteFailure(ffi, _)
            if ffi.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            EmojidbError::duplicate_alias(alias)
        }
        other => other.into(),
    }
}
