use serde::{Serialize, Deserialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    general: Option<General>,
    server: Option<Server>,
    db: Option<DB>,
    uploads: Option<Uploads>,
    layout: Option<Layout>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();

        let config_content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(format!("Failed to read config file: {}", e)),
        };

        let config: Config = match toml::from_str(&config_content) {
            Ok(config) => config,
            Err(e) => return Err(format!("Failed to parse config file: {}", e)),
        };

        Ok(Self {
            general: Some(config.general),
            server: Some(config.server),
            db: Some(config.db),
            uploads: Some(config.uploads),
            layout: Some(config.layout),
        })
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.server = Some(server);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        let server = self.server.get_or_insert(Server::default());
        server.http.port = port;
        self
    }

    pub fn with_mode(mut self, mode: String) -> Self {
        let general = self.general.get_or_insert(General::default());
        general.mode = Some(mode);
        self
    }

    pub fn with_db_url(mut self, url: String) -> Self {
        self.db = Some(DB { url });
        self
    }


    pub fn build(self) -> Result<Config, anyhow::Error> {

        let db = match self.db {
            Some(db) if !db.url.is_empty() => db,
            _ => return Err(anyhow::anyhow!("Database configuration is required")),
        };

        Ok(Config {
            general: self.general.unwrap_or_default(),
            server: self.server.unwrap_or_default(),
            db,
            uploads: self.uploads.unwrap_or_default(),
            layout: self.layout.unwrap_or_default(),
        })
    }
}

impl Config {
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.server.http.host, self.server.http.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub server: Server,
    pub db: DB,
    #[serde(default)]
    pub uploads: Uploads,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct General {
    pub mode: Option<String>,
}

impl Default for General {
    fn default() -> Self {
        General {
            mode: Some("production".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub http: HTTP,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HTTP {
    pub host: String,
    pub port: u16,
    pub allow_origin: Option<Vec<String>>,
}

impl Default for HTTP {
    fn default() -> Self {
        HTTP {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allow_origin: Some(vec!["*".to_string()]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DB {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Uploads {
    pub dir: PathBuf,
    pub max_upload_bytes: usize,
    pub public_path: String,
}

impl Default for Uploads {
    fn default() -> Self {
        Uploads {
            dir: PathBuf::from("uploads"),
            max_upload_bytes: default_max_upload_bytes(),
            public_path: "/uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub path: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            path: PathBuf::from("layout.html"),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
