//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILENAMES: [&str; 2] = ["omni.toml", ".omni.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `OMNI_` environment variables, `__` separating nested keys
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./omni.toml` or `./.omni.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/omni-ai/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path, Self::global_config_path(), Self::project_config_path())
            .extract()
            .map_err(Box::new)
    }

    fn figment(
        config_path: Option<&Path>,
        global_path: Option<PathBuf>,
        project_path: Option<PathBuf>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = project_path {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("OMNI_").split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/omni-ai/config.toml` if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("omni-ai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] OMNI_* environment variables");

        if let Some(path) = config_path {
            println!("  [CLI  ] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./omni.toml or ./.omni.toml");
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
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("omni-ai"));
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "omni.toml",
                r#"
[server]
bind = "127.0.0.1:7000"

[aggregation]
summary_max_chars = 50
"#,
            )?;
            jail.create_file(
                "custom.toml",
                r#"
[server]
bind = "127.0.0.1:9000"
"#,
            )?;

            let config: FileConfig = ConfigLoader::figment(
                Some(Path::new("custom.toml")),
                None,
                Some(PathBuf::from("omni.toml")),
            )
            .extract()?;
            assert_eq!(config.server.bind, "127.0.0.1:9000");
            assert_eq!(config.aggregation.summary_max_chars, 50);
            assert_eq!(config.providers.len(), 3);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "omni.toml",
                r#"
[server]
bind = "127.0.0.1:7000"

[aggregation]
max_retries = 1
"#,
            )?;
            jail.set_env("OMNI_SERVER__BIND", "0.0.0.0:9999");
            jail.set_env("OMNI_AGGREGATION__MAX_RETRIES", "2");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(PathBuf::from("omni.toml"))).extract()?;
            assert_eq!(config.server.bind, "0.0.0.0:9999");
            assert_eq!(config.aggregation.max_retries, 2);
            assert_eq!(config.providers.len(), 3);
            Ok(())
        });
    }

    #[test]
    fn test_providers_array_replaces_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            &dir,
            "omni.toml",
            r#"
[[providers]]
id = "openai/gpt-4"
label = "GPT-4"
shape = "openrouter"
endpoint = "https://openrouter.ai/api/v1/chat/completions"
api_key_env = "OPENROUTER_API_KEY"
"#,
        );

        let config: FileConfig = ConfigLoader::figment(Some(path.as_path()), None, None)
            .extract()
            .unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].label, "GPT-4");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = ConfigLoader::figment(Some(missing.as_path()), None, None).extract::<FileConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(&dir, "bad.toml", "[server\nbind = 1");
        let result = ConfigLoader::figment(Some(path.as_path()), None, None).extract::<FileConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_resolves() {
        let config: FileConfig = toml::from_str(include_str!("../../../omni.example.toml")).unwrap();
        let resolved = config
            .resolve(&|name| (name == "OPENROUTER_API_KEY").then(|| "or-key".to_string()))
            .unwrap();
        assert!(resolved.warnings.is_empty());
        assert_eq!(resolved.providers.len(), 3);
        assert!(resolved.providers.iter().all(|p| p.extra_headers.len() == 2));
        assert_eq!(resolved.providers[2].id, "mistralai/mixtral-8x7b");
    }
}
