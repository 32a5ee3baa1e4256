use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "courseplan.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog loaded when no file is given on the command line or at the
    /// menu prompt.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Resolve a catalog path against the project root, preferring `explicit`.
    #[must_use]
    pub fn catalog_path(&self, project_root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.project.catalog.path.clone())
            .map(|path| project_root.join(path))
    }

    #[must_use]
    pub fn store_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.store.path)
    }
}

/// Load `courseplan.toml` from `project_root`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config from the platform config directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir.join("courseplan/config.toml"))
}

fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load project and user config and settle the output mode.
///
/// # Errors
///
/// Returns an error if either config file is malformed.
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.as_deref(), env_format.as_deref());

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Output precedence: `--json` flag, then `FORMAT`, then user config, then
/// human.
fn resolve_output(cli_json: bool, user_output: Option<&str>, env_format: Option<&str>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some("json"),
            "human" | "pretty" | "text" => Some("human"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    env_format
        .and_then(normalize_output_mode)
        .or_else(|| user_output.and_then(normalize_output_mode))
        .unwrap_or("human")
        .to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("courses.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!(cfg.catalog.path.is_none());
        assert_eq!(cfg.store.path, PathBuf::from("courses.db"));
    }

    #[test]
    fn project_config_parses_sections() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "[catalog]\npath = \"data/courses.csv\"\n\n[store]\npath = \"plan.db\"\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.catalog.path, Some(PathBuf::from("data/courses.csv")));
        assert_eq!(cfg.store.path, PathBuf::from("plan.db"));
    }

    #[test]
    fn partial_project_config_keeps_store_default() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "[catalog]\npath = \"c.csv\"\n")
            .expect("write config");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.store.path, PathBuf::from("courses.db"));
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "[catalog\npath = ")
            .expect("write config");
        let err = load_project_config(root.path()).expect_err("must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn user_config_reads_output() {
        let root = tempfile::tempdir().expect("tempdir");
        let path = root.path().join("config.toml");
        std::fs::write(&path, "output = \"json\"\n").expect("write config");
        let cfg = load_user_config_from(&path).expect("load should succeed");
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        assert_eq!(resolve_output(true, Some("human"), Some("human")), "json");
    }

    #[test]
    fn env_beats_user_config() {
        assert_eq!(resolve_output(false, Some("json"), Some("pretty")), "human");
        assert_eq!(resolve_output(false, Some("human"), Some("JSON")), "json");
    }

    #[test]
    fn unknown_values_fall_through_to_human() {
        assert_eq!(resolve_output(false, Some("yaml"), Some("xml")), "human");
        assert_eq!(resolve_output(false, None, None), "human");
    }

    #[test]
    fn catalog_path_prefers_explicit_over_config() {
        let cfg = EffectiveConfig {
            project: ProjectConfig {
                catalog: CatalogConfig {
                    path: Some(PathBuf::from("configured.csv")),
                },
                store: StoreConfig::default(),
            },
            user: UserConfig::default(),
            resolved_output: "human".to_string(),
        };
        let root = Path::new("/work");
        assert_eq!(
            cfg.catalog_path(root, Some(Path::new("given.csv"))),
            Some(PathBuf::from("/work/given.csv"))
        );
        assert_eq!(cfg.catalog_path(root, None), Some(PathBuf::from("/work/configured.csv")));
        assert_eq!(cfg.store_path(root), PathBuf::from("/work/courses.db"));
    }
}
