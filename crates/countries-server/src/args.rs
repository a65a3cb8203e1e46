use std::{fmt, net::SocketAddr};

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "countries-server", version)]
/// Serves the countries GraphQL schema over HTTP
pub(crate) struct Args {
    /// IP address on which the server will listen for incoming connections.
    #[arg(short, long, env = "COUNTRIES_LISTEN_ADDRESS", default_value = "127.0.0.1:8787")]
    pub listen_address: SocketAddr,
    /// Path on which the GraphQL endpoint is mounted.
    #[arg(long, env = "COUNTRIES_GRAPHQL_PATH", default_value = countries_graphql::DEFAULT_GRAPHQL_PATH)]
    pub path: String,
    /// Set the logging level
    #[arg(long = "log", env = "COUNTRIES_LOG", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warning and error messages
    Info,
    /// Debug, info, warning and error messages from the server crates
    Debug,
    /// Everything, including dependencies
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "countries_server=error,countries_graphql=error,off",
            LogLevel::Warn => "countries_server=warn,countries_graphql=warn,off",
            LogLevel::Info => "countries_server=info,countries_graphql=info,off",
            LogLevel::Debug => "countries_server=debug,countries_graphql=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}
