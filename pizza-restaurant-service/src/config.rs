use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

pub const DEFAULT_PORT: u16 = 5555;

#[derive(Args, Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database path or URL
    #[arg(long, env = "DATABASE_URL", default_value = "app.db", global = true)]
    pub database_url: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8, global = true)]
    pub pool_size: u32,
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServeConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
