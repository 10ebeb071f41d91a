use anyhow::{Context, Result};
use blogdoc::{DocumentStore, StoreConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "blogdoc.toml";

/// Resolved runtime context for a single CLI invocation
pub struct AppContext {
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    /// Store built from the resolved configuration
    pub store: DocumentStore,
}

/// Configuration stored in blogdoc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub data_file: Option<String>,
    pub images_dir: Option<String>,
}

impl AppContext {
    /// Resolve configuration in order: file, environment, command line.
    pub fn resolve(config_arg: Option<&Path>, data_file_arg: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_path = match config_arg {
            Some(path) => Some(path.to_path_buf()),
            None => Some(current_dir.join(CONFIG_FILE_NAME)).filter(|p| p.exists()),
        };

        let mut config = match &config_path {
            Some(path) => {
                let base = path.parent().unwrap_or(Path::new("."));
                load_file_config(path)?.relative_to(base)
            }
            None => StoreConfig::default(),
        };
        config = config.with_env_overrides();

        if let Some(data_file) = data_file_arg {
            config.data_file = data_file.to_path_buf();
        }

        log::debug!("using data file {}", config.data_file.display());

        Ok(Self {
            config_path,
            store: DocumentStore::new(config),
        })
    }
}

fn load_file_config(path: &Path) -> Result<StoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: FileConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    file.into_store_config()
}

impl FileConfig {
    fn into_store_config(self) -> Result<StoreConfig> {
        let mut config = StoreConfig::default();
        if let Some(data_file) = self.store.data_file {
            config.data_file = PathBuf::from(expand_env(&data_file)?);
        }
        if let Some(images_dir) = self.store.images_dir {
            config.images_dir = PathBuf::from(expand_env(&images_dir)?);
        }
        Ok(config)
    }
}

/// Expand a value written as `${VAR}` from the environment
fn expand_env(value: &str) -> Result<String> {
    expand_with(value, |name| std::env::var(name).ok())
}

fn expand_with<F>(value: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(var_name) = value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        lookup(var_name).with_context(|| format!("Environment variable {var_name} not set"))
    } else {
        Ok(value.to_string())
    }
}
