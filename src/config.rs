use crate::algos::Weights;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Either `database` or `csv`.
    pub loader: String,
    pub database: DatabaseConfig,
    pub csv: CsvConfig,
    pub scoring: Weights,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader: "database".to_owned(),
            database: DatabaseConfig::default(),
            csv: CsvConfig::default(),
            scoring: Weights::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://volunteer-connect.db".to_owned(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Self> {
        let content = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot read configuration file {}", file_name.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("cannot parse configuration file")
    }
}

#[test]
fn test_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.loader, "database");
    assert_eq!(config.database.url, "sqlite://volunteer-connect.db");
    assert_eq!(config.csv.directory, PathBuf::from("data"));
    assert_eq!(config.scoring, Weights::default());
}

#[test]
fn test_overrides() {
    let config = Config::parse(
        r#"
        loader = "csv"

        [csv]
        directory = "/srv/tutoring"

        [scoring]
        load_penalty = 2.5
        "#,
    )
    .unwrap();
    assert_eq!(config.loader, "csv");
    assert_eq!(config.csv.directory, PathBuf::from("/srv/tutoring"));
    assert_eq!(config.scoring.affinity, 10.0);
    assert_eq!(config.scoring.load_penalty, 2.5);
}

#[test]
fn test_invalid() {
    assert!(Config::parse("scoring = 3").is_err());
}
