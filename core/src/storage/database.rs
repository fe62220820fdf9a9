use crate::{Error, Result};
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};

pub type Connection = SqliteConnection;

/// Schema version written by `schema.sql`
pub const SCHEMA_VERSION: i32 = 1;

/// Database manager for the local storage file
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    /// Create a new database manager
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Get a connection to an existing database
    pub fn connect(&self) -> Result<Connection> {
        let conn = SqliteConnection::open(&self.db_path)?;
        // Older files may predate a table; the schema is idempotent.
        self.initialize_schema(&conn)?;
        Ok(conn)
    }

    /// Create a new database and initialize it with the schema
    pub fn create(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = SqliteConnection::open(&self.db_path)?;
        self.initialize_schema(&conn)?;
        Ok(conn)
    }

    fn initialize_schema(&self, conn: &Connection) -> Result<()> {
        let schema = include_str!("../../schema.sql");
        conn.execute_batch(schema)?;

        let version = self.get_schema_version(conn)?;
        if version != SCHEMA_VERSION {
            return Err(Error::Storage(format!(
                "unsupported schema version {} in {}",
                version,
                self.db_path.display()
            )));
        }
        Ok(())
    }

    /// Check if the database exists
    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Get or create a database connection
    pub fn get_or_create(&self) -> Result<Connection> {
        if self.exists() {
            self.connect()
        } else {
            self.create()
        }
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn get_schema_version(&self, conn: &Connection) -> Result<i32> {
        let version: String = conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;

        version
            .parse::<i32>()
            .map_err(|_| Error::InvalidInput("Invalid schema version".to_string()))
    }
}
