mod mock_generator;
mod proxy_client;
mod upstream_client;

pub use mock_generator::*;
pub use proxy_client::*;
pub use upstream_client::*;
