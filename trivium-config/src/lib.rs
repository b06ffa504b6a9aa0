//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Precedence is file first, then `TRIVIUM_`-prefixed environment variables
//! (`TRIVIUM_SERVER__PORT=9000` overrides `server.port`). `${VAR}` references
//! inside string values are expanded recursively with a bounded depth. Every
//! field has a default, so the server runs with no file present at all.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriviumConfig {
    pub server: ServerConfig,
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
}

impl Default for TriviumConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            sources: SourcesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Bind address for the tool server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8642,
        }
    }
}

/// Base URLs and identification for the upstream collaborators. The bases
/// are overridable so integration tests can point every client at a local
/// mock server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// DuckDuckGo HTML vertical.
    pub search_base: String,
    /// MediaWiki action API host (opensearch + extracts).
    pub wikipedia_api_base: String,
    /// Wikimedia REST host (on-this-day feed).
    pub wikipedia_rest_base: String,
    /// User-Agent presented to the search vertical and arbitrary pages.
    pub browser_user_agent: String,
    /// User-Agent presented to the Wikimedia feed endpoint.
    pub feed_user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            search_base: "https://html.duckduckgo.com".to_string(),
            wikipedia_api_base: "https://en.wikipedia.org".to_string(),
            wikipedia_rest_base: "https://en.wikipedia.org".to_string(),
            browser_user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            feed_user_agent: "trivium/0.1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit log directory; falls back to `TRIVIUM_LOG_DIR`, then
    /// `~/.local/share/trivium`.
    pub dir: Option<String>,
    /// Duplicate log events to stderr.
    pub stderr: bool,
    /// "text" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            stderr: true,
            format: "text".to_string(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TriviumConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TriviumConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TriviumConfigLoader {
    /// Start with sensible defaults: YAML file + `TRIVIUM_` env overrides.
    ///
    /// ```
    /// use trivium_config::TriviumConfigLoader;
    ///
    /// let config = TriviumConfigLoader::new()
    ///     .with_yaml_str("server:\n  port: 9000")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.server.port, 9000);
    /// assert_eq!(config.server.host, "127.0.0.1");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("TRIVIUM").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file only if it exists, so headless deployments can rely
    /// purely on environment variables and defaults.
    pub fn with_file_if_present<P: AsRef<Path>>(self, path: P) -> Self {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            self
        }
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use trivium_config::TriviumConfigLoader;
    ///
    /// let cfg = TriviumConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// sources:
    ///   search_base: "http://localhost:9999"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.sources.search_base, "http://localhost:9999");
    /// assert_eq!(cfg.sources.wikipedia_api_base, "https://en.wikipedia.org");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    ///
    /// The loader combines YAML with `TRIVIUM_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// typed structs.
    pub fn load(self) -> Result<TriviumConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so `${VAR}` expansion can walk
        // the whole tree regardless of nesting.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TriviumConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("TRIVIUM_TEST_UA", Some("bot/2.0"), || {
            let mut v = json!("agent=${TRIVIUM_TEST_UA}");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("agent=bot/2.0"));
        });
    }

    #[test]
    fn expands_in_nested_objects() {
        temp_env::with_vars(
            [("WIKI_HOST", Some("wiki.test")), ("WIKI_SCHEME", Some("https"))],
            || {
                let mut v = json!({
                    "sources": { "wikipedia_api_base": "${WIKI_SCHEME}://${WIKI_HOST}" },
                    "ports": [8642, "${WIKI_SCHEME}"]
                });
                expand_env_in_value(&mut v);
                assert_eq!(
                    v,
                    json!({
                        "sources": { "wikipedia_api_base": "https://wiki.test" },
                        "ports": [8642, "https"]
                    })
                );
            },
        );
    }

    #[test]
    fn expansion_terminates_on_reference_cycles() {
        temp_env::with_vars([("CYC_A", Some("${CYC_B}")), ("CYC_B", Some("${CYC_A}"))], || {
            let mut v = json!("x=${CYC_A}-y");
            // The depth cap guarantees termination; the unresolved reference
            // stays in place.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${TRIVIUM_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${TRIVIUM_DOES_NOT_EXIST}"));
    }

    #[test]
    fn defaults_cover_every_field() {
        let cfg = TriviumConfig::default();
        assert_eq!(cfg.server.port, 8642);
        assert!(cfg.sources.search_base.contains("duckduckgo"));
        assert_eq!(cfg.logging.format, "text");
    }
}
