mod config;
mod error;
mod init;
mod node;
mod utils;
mod web_server;

use config::ServerConfig;
use init::init_logger;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_logger(config.log_level, config.log_file.as_deref())?;

    web_server::start(config).await?;
    Ok(())
}
