// Copyright 2022 Xayn AG
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::logging;

/// Prefix of the environment variables the config is read from.
pub const ENV_PREFIX: &str = "DAILYNEWS__";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
#[cfg_attr(test, serde(deny_unknown_fields))]
pub struct NewsClientConfig {
    pub logging: logging::Config,
    pub provider: dailynews_providers::Config,
}

/// Load the configuration into given type.
///
/// # Load order/priority
///
/// This will by ascending priority load:
///
/// 1. `./config.toml` or specified toml config file
/// 2. `./.env`
/// 3. `./.env.local`
/// 4. process environment
/// 5. options passed through `update_with`
///
/// Config values loaded from higher priority sources override such from lower
/// priority sources. E.g. values defined in `update_with` override values
/// from any other source.
///
/// `.env.local` is a semi-standard way to add temporary local overrides that you
/// don't want to commit, e.g. the API key.
///
/// # Env and .env
///
/// Environment variables from `.env` and `.env.local` will be loaded into the process
/// environment if they don't already exist there (keeping priority as described above).
///
/// Only environment variables with the `DAILYNEWS__` prefix will be considered and the
/// prefix is stripped. They are split at `__`. I.e. `DAILYNEWS__PROVIDER__API_KEY=abc`
/// will be treated like the json `{ "provider": { "api_key": "abc" } }` wrt.
/// deserializing the config.
///
/// Instead of a path an "inline" toml configuration can be passed in by prefixing
/// it with `inline:`.
pub fn load_config<C, U>(config: Option<&str>, update_with: U) -> Result<C, figment::Error>
where
    C: DeserializeOwned,
    U: Serialize,
{
    // the order must be from highest to lowest priority
    // or else it won't work correctly
    load_dotenv(".env.local")?;
    load_dotenv(".env")?;

    let mut figment = Figment::new()
        .join(Serialized::defaults(update_with))
        .join(Env::prefixed(ENV_PREFIX).split("__"));

    let provider = if let Some(content_or_path) = config {
        if let Some(content) = content_or_path.strip_prefix("inline:") {
            Some(Toml::string(content))
        } else {
            let path = Path::new(content_or_path);
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "Config file missing or not a file: {}",
                    path.display()
                )));
            }
            Some(Toml::file(path))
        }
    } else {
        // an absent default config is fine, all fields have defaults
        let default_file = Path::new("config.toml");
        default_file.is_file().then(|| Toml::file(default_file))
    };

    if let Some(provider) = provider {
        figment = figment.join(provider);
    }

    figment.extract()
}

fn load_dotenv(file_name: &str) -> Result<(), figment::Error> {
    match dotenvy::from_filename(file_name) {
        Err(error) if !error.not_found() => {
            Err(figment::Error::from(error.to_string()).with_path(file_name))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use figment::Jail;
    use serde_json::{json, Value};
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    fn load(config: Option<&str>, update_with: Value) -> NewsClientConfig {
        load_config(config, update_with).unwrap()
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load(None, json!({}));
            assert_eq!(config.logging.level, LevelFilter::INFO);
            assert!(config.logging.file.is_none());
            assert_eq!(config.provider.page_size, 10);
            assert_eq!(config.provider.base_url.as_str(), "https://newsapi.org/v2/");
            assert!(config.provider.timeout.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_config_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [logging]
                level = "debug"

                [provider]
                country = "de"
                timeout = 3500
                "#,
            )?;

            let config = load(None, json!({}));
            assert_eq!(config.logging.level, LevelFilter::DEBUG);
            assert_eq!(config.provider.country, "de");
            assert_eq!(config.provider.timeout, Some(Duration::from_millis(3500)));
            Ok(())
        });
    }

    #[test]
    fn test_inline_config() {
        Jail::expect_with(|_jail| {
            let config = load(Some("inline:[provider]\npage_size = 25"), json!({}));
            assert_eq!(config.provider.page_size, 25);
            Ok(())
        });
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let error = load_config::<NewsClientConfig, _>(Some("typo.toml"), json!({}))
                .unwrap_err();
            assert!(error.to_string().contains("typo.toml"));

            std::fs::create_dir("config-dir").unwrap();
            assert!(load_config::<NewsClientConfig, _>(Some("config-dir"), json!({})).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[provider]\nlanguage = \"fr\"")?;
            jail.set_env("DAILYNEWS__PROVIDER__LANGUAGE", "de");

            let config = load(Some("custom.toml"), json!({}));
            assert_eq!(config.provider.language, "de");
            Ok(())
        });
    }

    #[test]
    fn test_overrides_take_priority() {
        Jail::expect_with(|jail| {
            jail.set_env("DAILYNEWS__LOGGING__FILE", "env.log");

            let config = load(None, json!({ "logging": { "file": "cli.log" } }));
            assert_eq!(config.logging.file.as_deref(), Some(Path::new("cli.log")));
            Ok(())
        });
    }

    #[test]
    fn test_api_key_is_redacted() {
        Jail::expect_with(|jail| {
            jail.set_env("DAILYNEWS__PROVIDER__API_KEY", "very-secret");

            let config = load(None, json!({}));
            let printed = serde_json::to_string_pretty(&config).unwrap();
            assert!(printed.contains("[REDACTED]"));
            assert!(!printed.contains("very-secret"));
            Ok(())
        });
    }
}
