mod client;

pub use client::NestHttpClient;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Nest {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for Nest {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_url() -> String {
    "https://developer-api.nest.com".to_string()
}

fn default_max_redirects() -> usize {
    5
}

impl Nest {
    pub fn new_client(&self) -> anyhow::Result<NestHttpClient> {
        NestHttpClient::new(&self.url, self.max_redirects)
    }
}
