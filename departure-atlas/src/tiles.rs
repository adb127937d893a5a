//! Map-tile URL resolution.
//!
//! Only the URL of a tile is kept; the image bytes are left to whoever
//! renders the map. The client checks that the tile server can serve the
//! tile before handing the URL out.

use crate::geo::TileIndex;
use crate::transport::TransportError;

/// Default tile server.
pub const DEFAULT_TILE_BASE_URL: &str = "https://a.tile.openstreetmap.org";

/// Tile servers reject requests without an identifying agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the tile client.
#[derive(Debug, Clone)]
pub struct TileConfig {
    /// Base URL of the tile server
    pub base_url: String,
    /// Whether to fetch the tile to confirm it exists
    pub verify: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TileConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_TILE_BASE_URL.to_string(),
            verify: true,
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Skip the existence check and build URLs offline.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for a `{zoom}/{x}/{y}.png` tile server.
#[derive(Debug, Clone)]
pub struct TileClient {
    http: reqwest::Client,
    base_url: String,
    verify: bool,
}

impl TileClient {
    pub fn new(config: TileConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            verify: config.verify,
        })
    }

    /// URL of the tile image.
    pub fn url_for(&self, tile: TileIndex) -> String {
        format!("{}/{}.png", self.base_url, tile.path())
    }

    /// Resolve a tile to its URL, confirming the server has it.
    pub async fn resolve(&self, tile: TileIndex) -> Result<String, TransportError> {
        let url = self.url_for(tile);
        if !self.verify {
            return Ok(url);
        }

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: format!("failed to fetch tile {tile}"),
            });
        }
        Ok(url)
    }
}
