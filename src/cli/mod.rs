use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, StoreBackend};

#[derive(Debug, Parser)]
#[command(name = "catdog-api")]
#[command(about = "Cat and dog records web server")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, value_parser = parse_backend, help = "Store backend: memory or postgres")]
    pub store: Option<StoreBackend>,

    #[arg(long, help = "PostgreSQL connection string (overrides DATABASE_URL)")]
    pub database_url: Option<String>,

    #[arg(long, help = "Directory of <view>.html template overrides")]
    pub templates: Option<PathBuf>,

    #[arg(long, help = "Directory served under /public")]
    pub static_dir: Option<PathBuf>,
}

fn parse_backend(s: &str) -> Result<StoreBackend, String> {
    s.parse()
}

impl Cli {
    /// Layer command-line flags over the environment configuration
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = Some(url);
            // a URL on the command line implies postgres unless told otherwise
            if self.store.is_none() {
                config.database.backend = StoreBackend::Postgres;
            }
        }
        if let Some(backend) = self.store {
            config.database.backend = backend;
        }
        if let Some(dir) = self.templates {
            config.views.template_dir = Some(dir);
        }
        if let Some(dir) = self.static_dir {
            config.views.static_dir = Some(dir);
        }
        config
    }
}
