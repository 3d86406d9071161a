//! quizzer configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizzer_core::engine::{default_credits, EngineConfig};
use quizzer_core::model::default_quizzes;
use quizzer_core::store::MemoryStore;
use quizzer_core::traits::QuizStore;

use crate::json::JsonFileStore;

/// Where quizzes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
        #[serde(default = "default_true")]
        seed_defaults: bool,
    },
    Memory {
        #[serde(default = "default_true")]
        seed_defaults: bool,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
            seed_defaults: true,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("quizzes.json")
}

fn default_true() -> bool {
    true
}

/// Top-level quizzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizzerConfig {
    /// Store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Command prompt shown by the REPL.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Lines printed by the `credits` command.
    #[serde(default = "default_credits")]
    pub credits: Vec<String>,
    /// Fixed seed for the play shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_prompt() -> String {
    "quiz > ".to_string()
}

impl Default for QuizzerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            prompt: default_prompt(),
            credits: default_credits(),
            seed: None,
        }
    }
}

impl QuizzerConfig {
    /// Engine settings carried by this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            credits: self.credits.clone(),
            seed: self.seed,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(rel) = result[from..].find("${") {
        let start = from + rel;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + len]).unwrap_or_default();
        result.replace_range(start..start + len + 1, &value);
        // Substituted text is never expanded again.
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizzer.toml` in the current directory
/// 2. `~/.config/quizzer/config.toml`
///
/// `QUIZZER_STORE_PATH` overrides the JSON store path.
pub fn load_config() -> Result<QuizzerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizzerConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizzer.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizzerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizzerConfig::default(),
    };

    if let Ok(store_path) = std::env::var("QUIZZER_STORE_PATH") {
        config.store = match config.store {
            StoreConfig::Json { seed_defaults, .. } | StoreConfig::Memory { seed_defaults } => {
                StoreConfig::Json {
                    path: PathBuf::from(store_path),
                    seed_defaults,
                }
            }
        };
    }

    if let StoreConfig::Json { path, .. } = &mut config.store {
        *path = PathBuf::from(resolve_env_vars(&path.to_string_lossy()));
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizzer"))
}

/// Create a store instance from its configuration.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn QuizStore>> {
    match config {
        StoreConfig::Json {
            path,
            seed_defaults,
        } => Ok(Arc::new(JsonFileStore::open(path, *seed_defaults).await?)),
        StoreConfig::Memory { seed_defaults } => {
            let drafts = if *seed_defaults {
                default_quizzes()
            } else {
                Vec::new()
            };
            Ok(Arc::new(MemoryStore::with_drafts(drafts)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZZER_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZZER_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZZER_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZZER_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_QUIZZER_SELF_REF", "${_QUIZZER_SELF_REF}");
        std::env::set_var("_QUIZZER_DIR", "/data");
        assert_eq!(
            resolve_env_vars("${_QUIZZER_SELF_REF}/q.json"),
            "${_QUIZZER_SELF_REF}/q.json"
        );
        assert_eq!(
            resolve_env_vars("${_QUIZZER_SELF_REF}${_QUIZZER_DIR}/q.json"),
            "${_QUIZZER_SELF_REF}/data/q.json"
        );
        std::env::remove_var("_QUIZZER_SELF_REF");
        std::env::remove_var("_QUIZZER_DIR");
    }

    #[test]
    fn default_config() {
        let config = QuizzerConfig::default();
        assert_eq!(config.prompt, "quiz > ");
        assert_eq!(config.seed, None);
        assert_eq!(
            config.store,
            StoreConfig::Json {
                path: PathBuf::from("quizzes.json"),
                seed_defaults: true
            }
        );
    }

    #[test]
    fn parse_store_config() {
        let toml_str = r#"
prompt = "> "
credits = ["Ada", "Grace"]
seed = 12

[store]
type = "json"
path = "/tmp/my-quizzes.json"
seed_defaults = false
"#;
        let config: QuizzerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.credits, ["Ada", "Grace"]);
        assert_eq!(
            config.store,
            StoreConfig::Json {
                path: PathBuf::from("/tmp/my-quizzes.json"),
                seed_defaults: false
            }
        );

        let engine = config.engine_config();
        assert_eq!(engine.seed, Some(12));
        assert_eq!(engine.credits.len(), 2);
    }

    #[test]
    fn parse_memory_store() {
        let config: QuizzerConfig = toml::from_str("[store]\ntype = \"memory\"\n").unwrap();
        assert_eq!(
            config.store,
            StoreConfig::Memory {
                seed_defaults: true
            }
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzer.toml");
        std::fs::write(&path, "prompt = \"? \"\n[store]\ntype = \"memory\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.prompt, "? ");
    }

    #[tokio::test]
    async fn open_memory_store() {
        let seeded = open_store(&StoreConfig::Memory {
            seed_defaults: true,
        })
        .await
        .unwrap();
        assert_eq!(seeded.list().await.unwrap().len(), 4);

        let empty = open_store(&StoreConfig::Memory {
            seed_defaults: false,
        })
        .await
        .unwrap();
        assert!(empty.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn open_json_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&StoreConfig::Json {
            path: dir.path().join("q.json"),
            seed_defaults: true,
        })
        .await
        .unwrap();
        assert_eq!(store.get(2).await.unwrap().answer, "Paris");
    }
}
