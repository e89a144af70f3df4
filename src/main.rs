use log::{debug, info};
use std::net::SocketAddr;
use std::sync::Arc;

use publisher_roi::config::AppConfig;
use publisher_roi::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the ROI calculator service...");

    let config = AppConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    // Host-side hook for every recalculation
    let calculator = config.build_calculator()?.with_observer(|input, projection| {
        debug!(
            "Recalculated {:?}: trailguide={:.2} agency={:.2} diy={:.2}",
            input, projection.trailguide.net_roi, projection.agency.net_roi, projection.diy.net_roi
        );
    });
    info!("Calculator ready: {:?}", calculator.settings());

    // Bind to 0.0.0.0 so the service is reachable from the site host
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();

    let api = routes::api(Arc::new(calculator));
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;

    Ok(())
}
