use crate::game::scoring::{ScoringRules, DEFAULT_LOWER_IS_BETTER};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Realtime scoreboard server
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about)]
pub struct Config {
    /// Address to bind to
    #[clap(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to listen on
    #[clap(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,
    /// Backing store endpoint; persistence is disabled when unset
    #[clap(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,
    /// Access token for the backing store
    #[clap(long, env = "REDIS_TOKEN", hide_env_values = true)]
    pub redis_token: Option<String>,
    /// Key holding the whole scoreboard
    #[clap(long, env = "STATE_KEY", default_value = "scoreboard:state")]
    pub state_key: String,
    /// Refuse to start without a reachable backing store
    #[clap(long, env = "REQUIRE_STORE")]
    pub require_store: bool,
    /// Directory with the static client page
    #[clap(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
    /// Game name fragments where the lowest score wins
    #[clap(
        long = "lower-is-better",
        env = "LOWER_IS_BETTER",
        value_delimiter = ',',
        default_value = DEFAULT_LOWER_IS_BETTER
    )]
    pub lower_is_better: Vec<String>,
    /// Capacity of the coordinator's command queue
    #[clap(long, default_value = "1024")]
    pub queue_capacity: usize,
}

impl Config {
    pub fn scoring_rules(&self) -> ScoringRules {
        ScoringRules::new(self.lower_is_better.clone())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
