pub mod templates;

use sqlx::postgres::{PgPool, PgPoolOptions, PgConnectOptions};
use sqlx::ConnectOptions;
use std::process;

use crate::config::Config;

use self::templates::TemplateQueries;

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
    pub templates: TemplateQueries,
}

impl Database {
    pub async fn new(config: &Config) -> Self {

        let mut opts: PgConnectOptions = match config.db.url.parse() {
            Ok(opts) => opts,
            Err(e) => {
                eprintln!("Invalid database URL: {}", e);
                process::exit(1);
            }
        };
        opts = opts.log_statements(log::LevelFilter::Debug);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .connect_with(opts)
            .await;

        let pool = match pool {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("Database Error:\n");
                // Print the error with full context
                let mut error: &dyn std::error::Error = &e;
                eprintln!("Error: {}", error);
                while let Some(source) = error.source() {
                    eprintln!("Caused by: {}", source);
                    error = source;
                }
                eprintln!("\nMailsmith cannot start without a valid database connection.");
                process::exit(1);
            }
        };

        Self {
            templates: TemplateQueries::new(pool.clone()),
            pool,
        }
    }

    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}
