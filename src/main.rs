use static_dev_server::{config, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // One thread accepts and serves every connection
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(server::run(&cfg)))
}
