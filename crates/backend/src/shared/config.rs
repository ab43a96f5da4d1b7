use contracts::shared::layout::WarehouseLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub warehouse: WarehouseLayout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".to_string()
}

/// Хранилище палет: SQLite-файл или память процесса
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub path: String,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[database]
backend = "sqlite"
path = "target/db/app.db"

[warehouse]
enforce_levels = false

[warehouse.floor]
letter = "D"
count = 28

[[warehouse.sections]]
letter = "A"
niche_min = 1
niche_max = 3
levels = 4
slots_per_level = 3

[[warehouse.sections]]
letter = "B"
niche_min = 2
niche_max = 3
levels = 4
slots_per_level = 3
trays = [{ niche = 3, count = 5 }]

[[warehouse.sections]]
letter = "C"
niche_min = 1
niche_max = 5
levels = 4
slots_per_level = 3
trays = [
    { niche = 1, count = 4 },
    { niche = 2, count = 4 },
    { niche = 3, count = 4 },
    { niche = 4, count = 4 },
    { niche = 5, count = 4 },
]
"#;

/// Parse a configuration document and check its warehouse layout
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.warehouse.check()?;
    Ok(config)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        } else {
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    match exe_dir() {
        Some(dir) => dir.join(db_path),
        None => db_path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::layout::LayoutError;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.database.backend, StoreBackend::Sqlite);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.warehouse, WarehouseLayout::default());
        assert_eq!(config.warehouse.capacity(), 155);
    }

    #[test]
    fn test_missing_tables_fall_back_to_defaults() {
        let config = parse_config("[database]\npath = \"x.db\"\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.warehouse, WarehouseLayout::default());
    }

    #[test]
    fn test_single_section_variant() {
        let config = parse_config(
            r#"
[database]
path = "x.db"

[warehouse.floor]
letter = "D"
count = 28

[[warehouse.sections]]
letter = "A"
niche_min = 1
niche_max = 3
levels = 4
slots_per_level = 3
trays = [{ niche = 2, count = 4 }]
"#,
        )
        .unwrap();
        assert_eq!(config.warehouse.sections.len(), 1);
        assert_eq!(config.warehouse.capacity(), 36 + 1 + 28);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let err = parse_config(
            r#"
[database]
path = "x.db"

[warehouse.floor]
letter = "A"
count = 28

[[warehouse.sections]]
letter = "A"
niche_min = 1
niche_max = 3
levels = 4
slots_per_level = 3
"#,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::FloorCollision('A'))
        );
    }

    #[test]
    fn test_absolute_database_path_is_kept() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let absolute = std::env::temp_dir().join("pallets.db");
        config.database.path = absolute.to_string_lossy().into_owned();
        assert_eq!(get_database_path(&config), absolute);
    }
}
