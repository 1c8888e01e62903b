//! Configuration file loading and parsing.

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::Error;

use super::{ENV_CONFIG_PATH, Lookup, VectorStoreProvider};

/// Configuration loaded from TOML file. Every field is optional.
///
/// There is no database URL key; it only comes from `SUPABASE_DB_URL`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub provider: Option<VectorStoreProvider>,
    pub collection_name: Option<String>,
    pub embedding_dims: Option<usize>,
    pub embedding_model: Option<String>,
    pub llm_model: Option<String>,
    pub llm_temperature: Option<f32>,
    pub openai_base_url: Option<String>,
    pub user_id: Option<String>,
    pub infer: Option<bool>,
}

/// Location of the config file: `SUPAMEM_CONFIG`, or `<config_dir>/supamem/config.toml`.
pub fn config_path(lookup: Lookup<'_>) -> PathBuf {
    if let Some(path) = lookup(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config_dir.join("supamem/config.toml")
}

/// Load configuration from TOML file, if one exists.
pub fn load_from_file(lookup: Lookup<'_>) -> Result<Option<ConfigFile>, Error> {
    let config_path = config_path(lookup);

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config file");
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_malformed_toml() {
        let content = r#"
This is not valid TOML
 [[unclosed bracket
 "#;

        let result: Result<ConfigFile, _> = toml::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_config_file() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert!(config.collection_name.is_none());
        assert!(config.embedding_dims.is_none());
        assert!(config.provider.is_none());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str(r#"provider = "qdrant""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_string_key_rejected() {
        let result: Result<ConfigFile, _> =
            toml::from_str(r#"connection_string = "postgresql://file@localhost/postgres""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "provider = \"supabase\"\ncollection_name = \"notes\"\nembedding_dims = 768\n",
        )
        .unwrap();

        let path_str = path.to_string_lossy().to_string();
        let lookup = move |name: &str| (name == ENV_CONFIG_PATH).then(|| path_str.clone());
        let config = load_from_file(&lookup).unwrap().unwrap();

        assert_eq!(config.provider, Some(VectorStoreProvider::Supabase));
        assert_eq!(config.collection_name.as_deref(), Some("notes"));
        assert_eq!(config.embedding_dims, Some(768));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path_str = dir.path().join("absent.toml").to_string_lossy().to_string();
        let lookup = move |name: &str| (name == ENV_CONFIG_PATH).then(|| path_str.clone());
        assert!(load_from_file(&lookup).unwrap().is_none());
    }

    #[test]
    fn test_unparseable_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "embedding_dims = \"many\"").unwrap();

        let path_str = path.to_string_lossy().to_string();
        let lookup = move |name: &str| (name == ENV_CONFIG_PATH).then(|| path_str.clone());
        assert!(matches!(load_from_file(&lookup), Err(Error::Config(_))));
    }
}
