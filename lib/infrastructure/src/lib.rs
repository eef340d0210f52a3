mod http;
mod monitoring;

pub use monitoring::{EnvFilterConfig, MonitoringConfig};

pub use http::client::{bearer_auth, new_json_api_client};
pub use http::server::HttpServerConfig;
