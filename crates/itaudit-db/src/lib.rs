pub use sea_orm;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub mod entities;

/// Opens the audit database.
///
/// SQLite serializes writers anyway, so callers normally ask for a single
/// pooled connection shared by every request.
///
/// Older databases declare `FOREIGN KEY` clauses on the comment tables but
/// were never run with enforcement, and comments outlive their asset. sqlx
/// turns enforcement on by default, so it is switched off here.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(max_connections.max(1))
        .min_connections(1)
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(|o| o.foreign_keys(false));
    Database::connect(opt).await
}
