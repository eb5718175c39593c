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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dailynews_providers::Category;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Queries the news API and prints the decoded responses.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Use given configuration file.
    ///
    /// Instead of a path "inline" toml configuration file can also be
    /// passed in by prefixing it with `inline:`.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print the config and exit instead of querying the API.
    #[arg(long, global = true)]
    pub print_config: bool,

    /// File to log to additionally to logging to stderr.
    #[arg(short, long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Articles matching a keyword.
    Search {
        keyword: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Articles of a single source.
    Source {
        /// Source id, e.g. `bbc-news`.
        source: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Top headlines of a category.
    Headlines {
        category: Category,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Latest articles of the configured default sources.
    Everything {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Sources publishing in a category.
    Sources {
        category: Category,
        /// Defaults to the configured language.
        #[arg(long)]
        language: Option<String>,
    },
}

impl Args {
    pub fn to_config_overrides(&self) -> impl Serialize {
        let mut map = Map::new();
        if let Some(log_file) = &self.log_file {
            map.insert(String::from("logging"), json!({ "file": log_file }));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::parse_from(["news_client", "search", "bitcoin", "--page", "2"]);
        assert_eq!(
            args.command,
            Some(Command::Search {
                keyword: "bitcoin".into(),
                page: 2,
            }),
        );

        let args = Args::parse_from(["news_client", "headlines", "Technology"]);
        assert_eq!(
            args.command,
            Some(Command::Headlines {
                category: Category::Technology,
                page: 1,
            }),
        );

        let args = Args::parse_from(["news_client", "sources", "science", "--language", "de"]);
        assert_eq!(
            args.command,
            Some(Command::Sources {
                category: Category::Science,
                language: Some("de".into()),
            }),
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Args::try_parse_from(["news_client", "headlines", "weather"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "news_client",
            "everything",
            "--print-config",
            "--config",
            "inline:[provider]\npage_size = 5",
        ]);
        assert!(args.print_config);
        assert_eq!(args.config.as_deref(), Some("inline:[provider]\npage_size = 5"));
        assert_eq!(args.command, Some(Command::Everything { page: 1 }));
    }

    #[test]
    fn test_log_file_override() {
        let args = Args::parse_from(["news_client", "--log-file", "client.log"]);
        assert_eq!(
            serde_json::to_value(args.to_config_overrides()).unwrap(),
            json!({ "logging": { "file": "client.log" } }),
        );

        let args = Args::parse_from(["news_client"]);
        assert_eq!(
            serde_json::to_value(args.to_config_overrides()).unwrap(),
            json!({}),
        );
    }
}
