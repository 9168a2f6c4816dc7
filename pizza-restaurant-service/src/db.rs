use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub type MigrationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Per-connection SQLite settings applied whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // SQLite ships with foreign key enforcement off.
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)?;
        if let Some(timeout) = self.busy_timeout {
            conn.batch_execute(&format!("PRAGMA busy_timeout = {};", timeout.as_millis()))
                .map_err(r2d2::Error::QueryError)?;
        }
        Ok(())
    }
}

pub fn establish_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)
}

/// A single-connection pool over a private in-memory database, migrated and
/// ready for use. Every call returns an independent database.
pub fn in_memory_pool() -> Result<DbPool, MigrationError> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)?;
    run_migrations(&mut *pool.get()?)?;
    Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), MigrationError> {
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
