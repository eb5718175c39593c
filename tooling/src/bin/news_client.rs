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

//! Calls the news api and prints the responses as json.

#![forbid(unsafe_code, unsafe_op_in_unsafe_fn)]
#![deny(
    clippy::future_not_send,
    clippy::pedantic,
    noop_method_call,
    rust_2018_idioms,
    unused_qualifications
)]
#![warn(unreachable_pub, rustdoc::missing_crate_level_docs)]
#![allow(
    clippy::items_after_statements,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use dailynews_providers::{Error, InFlight};
use dailynews_tooling::{
    cli::{Args, Command},
    config::{load_config, NewsClientConfig},
    logging,
};
use serde::Serialize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config: NewsClientConfig = load_config(args.config.as_deref(), args.to_config_overrides())
        .context("Failed to load the configuration")?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help().ok();
        bail!("No subcommand given");
    };

    logging::initialize_global(&config.logging).context("Failed to initialize logging")?;
    let client = config
        .provider
        .build()
        .context("Invalid provider configuration. Is DAILYNEWS__PROVIDER__API_KEY set?")?;

    info!(?command, "querying news api");
    match command {
        Command::Search { keyword, page } => print(client.search_articles(&keyword, page)).await,
        Command::Source { source, page } => print(client.articles_by_source(&source, page)).await,
        Command::Headlines { category, page } => print(client.top_headlines(category, page)).await,
        Command::Everything { page } => print(client.everything(page)).await,
        Command::Sources { category, language } => {
            let language = language.unwrap_or_else(|| client.defaults().language.clone());
            print(client.sources(category, &language)).await
        }
    }
}

async fn print<T>(request: Result<InFlight<T>, Error>) -> Result<()>
where
    T: Serialize + Send + 'static,
{
    let response = request
        .context("Invalid query")?
        .await
        .context("The request was cancelled")?
        .context("The request failed")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
