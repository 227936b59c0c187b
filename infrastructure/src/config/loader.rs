//! Configuration loader with multi-source merging

use super::file_config::{ConfigError, ENV_VARS, FileConfig, ValidatedConfig};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: [&str; 2] = ["blob-agent.toml", ".blob-agent.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AZURE_*` environment variables (including those from `.env`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./blob-agent.toml` or `./.blob-agent.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/blob-agent/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path.filter(|p| !p.exists()) {
            return Err(ConfigError::Invalid(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let figment = Self::files(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        );
        Self::with_env(figment).extract().map_err(|e| Box::new(e).into())
    }

    /// Load and validate in one step
    pub fn load_validated(config_path: Option<&Path>) -> Result<ValidatedConfig, ConfigError> {
        Self::load(config_path)?.validate()
    }

    /// Defaults merged with whichever of the given files exist
    fn files(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
    }

    /// Overlay the `AZURE_*` variables that are set.
    ///
    /// Values are taken as raw strings: a key of all digits or a container
    /// named `2024` must not be reinterpreted as a number.
    fn with_env(figment: Figment) -> Figment {
        ENV_VARS
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (*key, value)))
            .fold(figment, |figment, (key, value)| {
                figment.merge(Serialized::default(key, value))
            })
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("blob-agent").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config sources being used (for `--show-config`)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        for (var, key) in ENV_VARS {
            let state = if std::env::var_os(var).is_some() {
                "SET"
            } else {
                "   "
            };
            println!("  [{}] Env:     {} ({})", state, var, key);
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./blob-agent.toml or ./.blob-agent.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;

    const VALID_ENV: [(&str, &str); 7] = [
        ("AZURE_OPENAI_ENDPOINT", "https://env.openai.azure.com"),
        ("AZURE_OPENAI_DEPLOYMENT_NAME", "gpt-4o"),
        ("AZURE_OPENAI_API_KEY", "env-key"),
        ("AZURE_OPENAI_API_VERSION", "2025-01-01-preview"),
        ("AZURE_STORAGE_ACCOUNT_NAME", "envacct"),
        ("AZURE_STORAGE_ACCOUNT_KEY", "a2V5"),
        ("AZURE_STORAGE_CONTAINER_NAME", "csv-data"),
    ];

    fn set_valid_env(jail: &mut Jail) {
        for (var, value) in VALID_ENV {
            jail.set_env(var, value);
        }
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_only() {
        let config: FileConfig = ConfigLoader::files(None, None, None).extract().unwrap();
        assert_eq!(config.behavior.max_tool_rounds, 10);
        assert!(config.openai.endpoint.is_none());
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        let project = write_toml(
            r#"
            [openai]
            deployment = "from-project"
            endpoint = "https://project.openai.azure.com"

            [behavior]
            max_tool_rounds = 4
            "#,
        );
        let explicit = write_toml(
            r#"
            [openai]
            deployment = "from-explicit"
            "#,
        );

        let config: FileConfig =
            ConfigLoader::files(None, Some(project.path()), Some(explicit.path()))
                .extract()
                .unwrap();

        assert_eq!(config.openai.deployment.as_deref(), Some("from-explicit"));
        assert_eq!(
            config.openai.endpoint.as_deref(),
            Some("https://project.openai.azure.com")
        );
        assert_eq!(config.behavior.max_tool_rounds, 4);
        assert_eq!(config.behavior.request_timeout_secs, 60);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let missing = Path::new("/nonexistent/blob-agent.toml");
        let config: FileConfig = ConfigLoader::files(Some(missing), Some(missing), None)
            .extract()
            .unwrap();
        assert!(config.storage.container.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = Path::new("/nonexistent/explicit.toml");
        let err = ConfigLoader::load(Some(missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("explicit.toml"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let broken = write_toml("[behavior]\nmax_tool_rounds = \"many\"\n");
        let result = ConfigLoader::files(None, None, Some(broken.path())).extract::<FileConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_path() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("blob-agent/config.toml"));
        }
    }

    #[test]
    fn test_env_values_land_on_their_keys() {
        Jail::expect_with(|jail| {
            set_valid_env(jail);

            let config: FileConfig = ConfigLoader::with_env(ConfigLoader::files(None, None, None))
                .extract()
                .unwrap();

            assert_eq!(
                config.openai.endpoint.as_deref(),
                Some("https://env.openai.azure.com")
            );
            assert_eq!(config.openai.deployment.as_deref(), Some("gpt-4o"));
            assert_eq!(config.openai.api_key.as_deref(), Some("env-key"));
            assert_eq!(config.openai.api_version.as_deref(), Some("2025-01-01-preview"));
            assert_eq!(config.storage.account_name.as_deref(), Some("envacct"));
            assert_eq!(config.storage.account_key.as_deref(), Some("a2V5"));
            assert_eq!(config.storage.container.as_deref(), Some("csv-data"));
            Ok(())
        });
    }

    #[test]
    fn test_env_numeric_and_boolean_values_stay_strings() {
        Jail::expect_with(|jail| {
            set_valid_env(jail);
            jail.set_env("AZURE_OPENAI_API_KEY", "0123456789");
            jail.set_env("AZURE_STORAGE_CONTAINER_NAME", "2024");
            jail.set_env("AZURE_OPENAI_DEPLOYMENT_NAME", "true");

            let validated = ConfigLoader::with_env(ConfigLoader::files(None, None, None))
                .extract::<FileConfig>()
                .unwrap()
                .validate()
                .unwrap();

            assert_eq!(validated.openai.api_key, "0123456789");
            assert_eq!(validated.storage.container, "2024");
            assert_eq!(validated.openai.deployment, "true");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "blob-agent.toml",
                r#"
                [openai]
                deployment = "from-file"
                api_version = "2024-06-01"

                [behavior]
                max_tool_rounds = 3
                "#,
            )?;
            jail.set_env("AZURE_OPENAI_DEPLOYMENT_NAME", "from-env");

            let project = Path::new("blob-agent.toml");
            let config: FileConfig =
                ConfigLoader::with_env(ConfigLoader::files(None, Some(project), None))
                    .extract()
                    .unwrap();

            assert_eq!(config.openai.deployment.as_deref(), Some("from-env"));
            assert_eq!(config.behavior.max_tool_rounds, 3);
            Ok(())
        });
    }

    #[test]
    fn test_missing_env_variable_reported_by_name() {
        Jail::expect_with(|jail| {
            set_valid_env(jail);
            jail.set_env("AZURE_STORAGE_ACCOUNT_KEY", "");

            let err = ConfigLoader::with_env(ConfigLoader::files(None, None, None))
                .extract::<FileConfig>()
                .unwrap()
                .validate()
                .unwrap_err();

            match &err {
                ConfigError::MissingVariables(vars) => {
                    assert_eq!(vars, &vec!["AZURE_STORAGE_ACCOUNT_KEY"]);
                }
                other => panic!("unexpected error: {other}"),
            }
            assert!(err.to_string().contains("AZURE_STORAGE_ACCOUNT_KEY"));
            Ok(())
        });
    }
}
