use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Minimal schema bootstrap, idempotent
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS a001_pallet (
        id TEXT PRIMARY KEY NOT NULL,
        scan_code TEXT NOT NULL,
        description TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        location TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_a001_pallet_scan_code ON a001_pallet (scan_code);",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_a001_pallet_location ON a001_pallet (location);",
    r#"
    CREATE TABLE IF NOT EXISTS a002_location_qr (
        id TEXT PRIMARY KEY NOT NULL,
        location TEXT NOT NULL,
        payload TEXT NOT NULL,
        section TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_a002_location_qr_location ON a002_location_qr (location);",
    r#"
    CREATE TABLE IF NOT EXISTS a003_pallet_qr (
        id TEXT PRIMARY KEY NOT NULL,
        payload TEXT NOT NULL,
        is_used INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    );
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_a003_pallet_qr_payload ON a003_pallet_qr (payload);",
];

/// Open (creating if needed) the SQLite file and bootstrap the schema
pub async fn connect_file(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Private in-memory database. One connection so every query sees the same data.
pub async fn connect_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let conn = connect_memory().await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|r| r.try_get::<String>("", "name").unwrap())
            .collect();
        assert_eq!(names, vec!["a001_pallet", "a002_location_qr", "a003_pallet_qr"]);
    }
}
