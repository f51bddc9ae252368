pub mod config;
pub mod db;
pub mod server;
pub mod handlers;
pub mod templates;
pub mod storage;
pub mod domain;
pub mod error;
pub mod utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub mode: String,
    pub config: config::Config,
    pub db: db::Database,
    pub storage: storage::Storage,
    pub layout: templates::EmailLayout,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, anyhow::Error> {
        let db = db::Database::new(&config).await;

        let storage = storage::Storage::new(&config).await?;

        let layout = templates::EmailLayout::new(&config);

        let mode = match &config.general.mode {
            Some(mode) => {
                if mode == "development" {
                    "development".to_string()
                } else {
                    "production".to_string()
                }
            }
            None => "production".to_string(),
        };

        println!("Running in {} mode", mode);

        let state = Arc::new(Self {
            mode,
            config,
            db,
            storage,
            layout,
        });

        Ok(state)
    }

    pub fn development_mode(&self) -> bool {
        self.mode == "development"
    }
}


use clap::{Parser, Subcommand};

#[derive(Parser)]
pub struct Args {
    #[arg(short, long, default_value = "config.toml")]
    pub config: std::path::PathBuf,
    #[arg(short, long, default_value = "3000")]
    pub port: u16,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run database migrations
    Migrate,
}

impl Args {
    pub fn build() -> Self {
        Args::parse()
    }
}
