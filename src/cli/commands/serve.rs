//! Serve Command
//!
//! Starts the HTTP service.

use crate::config::ConfigLoader;
use crate::server;
use crate::types::Result;

pub async fn run(bind: Option<String>) -> Result<()> {
    let mut config = ConfigLoader::load()?;

    if let Some(bind) = bind {
        config.server.bind_addr = bind;
        config.validate()?;
    }

    server::serve(config).await
}
