use anyhow::Context;
use dhub::kernel::config::load_config;
use dhub_logger::Logger;
use dhub_server::Server;

#[dhub_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "DominoHub starting");

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;
    Server::builder().config(cfg).build().await?.run().await
}
