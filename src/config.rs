//! Runtime configuration
//!
//! The server reads flags and environment variables through clap; the client
//! takes its values at build time.

use crate::domain::models::CompanyId;

/// Client-side settings baked into the bundle
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub company_id: CompanyId,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CRM_API_BASE_URL")
                .unwrap_or("http://localhost:3001")
                .to_string(),
            company_id: option_env!("CRM_COMPANY_ID")
                .and_then(|id| id.parse().ok())
                .unwrap_or(1),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use server::ServerConfig;

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::Context;
    use clap::Parser;

    use crate::infrastructure::storage::{
        InMemoryModuleSettingsRepository, JsonFileModuleSettingsRepository,
        ModuleSettingsRepository,
    };

    #[derive(Debug, Clone, Parser)]
    #[command(name = "crm-console")]
    #[command(about = "CRM console API server")]
    pub struct ServerConfig {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3001)]
        pub port: u16,

        /// Address to bind
        #[arg(long, env = "CRM_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        pub bind: IpAddr,

        /// Directory holding one JSON file per tenant
        /// (default: ~/.crm-console/module-settings)
        #[arg(long, env = "CRM_DATA_DIR")]
        pub data_dir: Option<PathBuf>,

        /// Keep module settings in memory only
        #[arg(long, env = "CRM_IN_MEMORY")]
        pub in_memory: bool,
    }

    impl ServerConfig {
        /// Read configuration from the environment only, ignoring argv.
        /// Used when another tool owns the command line.
        pub fn from_env() -> Self {
            Self::parse_from([env!("CARGO_PKG_NAME")])
        }

        pub fn socket_addr(&self) -> SocketAddr {
            SocketAddr::new(self.bind, self.port)
        }

        pub fn resolved_data_dir(&self) -> anyhow::Result<PathBuf> {
            match &self.data_dir {
                Some(dir) => Ok(dir.clone()),
                None => {
                    let home = dirs::home_dir().context("Could not determine home directory")?;
                    Ok(home.join(".crm-console").join("module-settings"))
                }
            }
        }

        pub async fn build_repository(&self) -> anyhow::Result<Arc<dyn ModuleSettingsRepository>> {
            if self.in_memory {
                tracing::info!("Module settings kept in memory");
                return Ok(Arc::new(InMemoryModuleSettingsRepository::new()));
            }

            let dir = self.resolved_data_dir()?;
            let repo = JsonFileModuleSettingsRepository::open(&dir)
                .await
                .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
            tracing::info!("Module settings stored in {}", dir.display());
            Ok(Arc::new(repo))
        }
    }
}
