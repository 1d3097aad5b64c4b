use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use graphql_openapi_server::server::Server;
use runtime::Config;
use tracing::{Level, info};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the OpenAPI server
#[derive(Debug, clap::Parser)]
#[command(
    styles = STYLES,
    about = "GraphQL OpenAPI Server - describe every GraphQL root field as a REST operation",
)]
struct Args {
    /// Path to the config file
    config: Option<PathBuf>,

    /// The path to the GraphQL API schema file, overriding the config
    #[arg(long, short = 's')]
    schema: Option<PathBuf>,

    /// The log level, overriding the config
    #[arg(long = "log", short = 'l')]
    log_level: Option<Level>,

    /// Print the OpenAPI document to stdout and exit instead of serving it
    #[arg(long)]
    print: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => runtime::read_config(path)?,
            None => runtime::read_config_from_env()?,
        };

        if let Some(schema) = &self.schema {
            config.schema.path = Some(schema.clone());
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;

    // Held until exit so buffered file logs are flushed
    let _guard = config.logging.setup()?;

    info!(
        "GraphQL OpenAPI Server v{}",
        std::env!("CARGO_PKG_VERSION")
    );

    let document = config.schema.document(&config.openapi)?;

    if args.print {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    Ok(Server::builder()
        .document(&document)
        .address(config.address)
        .port(config.port)
        .cors(config.cors)
        .build()?
        .start()
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_overrides_the_config_from_arguments() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "schema:\n  path: from_file.graphql\n")?;

            let args = Args::parse_from([
                "graphql-openapi-server",
                "config.yaml",
                "--schema",
                "from_args.graphql",
                "--log",
                "warn",
            ]);
            let config = args.config().unwrap();

            assert_eq!(
                config.schema.path,
                Some(PathBuf::from("from_args.graphql"))
            );
            assert_eq!(config.logging.level, Level::WARN);
            Ok(())
        });
    }

    #[test]
    fn it_keeps_the_config_without_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "schema:\n  path: from_file.graphql\n")?;

            let args = Args::parse_from(["graphql-openapi-server", "config.yaml", "--print"]);
            let config = args.config().unwrap();

            assert!(args.print);
            assert_eq!(
                config.schema.path,
                Some(PathBuf::from("from_file.graphql"))
            );
            assert_eq!(config.logging.level, Level::INFO);
            Ok(())
        });
    }
}
