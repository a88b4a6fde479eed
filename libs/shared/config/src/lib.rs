use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_APPOINTMENTS_DIR: &str = "appointments";
pub const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory that receives one JSON file per accepted appointment.
    pub appointments_dir: PathBuf,
    /// Optional JSON file replacing the built-in department catalog.
    pub department_catalog_path: Option<PathBuf>,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            appointments_dir: PathBuf::from(DEFAULT_APPOINTMENTS_DIR),
            department_catalog_path: None,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            appointments_dir: env::var("APPOINTMENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENTS_DIR not set, using default '{}'", DEFAULT_APPOINTMENTS_DIR);
                    PathBuf::from(DEFAULT_APPOINTMENTS_DIR)
                }),
            department_catalog_path: env::var("DEPARTMENT_CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| match port.parse::<u16>() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("SERVER_PORT '{}' is not a valid port number", port);
                        None
                    }
                })
                .unwrap_or_else(|| {
                    warn!("SERVER_PORT not usable, using default {}", DEFAULT_SERVER_PORT);
                    DEFAULT_SERVER_PORT
                }),
        };

        if !config.uses_custom_catalog() {
            warn!("DEPARTMENT_CATALOG_PATH not set, using built-in department catalog");
        }

        config
    }

    pub fn uses_custom_catalog(&self) -> bool {
        self.department_catalog_path.is_some()
    }
}
