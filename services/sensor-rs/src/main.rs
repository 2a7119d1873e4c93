use citysense_sensor::{telemetry, Config, Simulator, SimulatorError, TracingReporter};
use dotenvy::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), SimulatorError> {
    dotenv().ok();

    let config = Config::load()?;
    telemetry::init_tracing(&config.log_level)?;

    info!("🚗 Starting CitySense Simulation... (Press Ctrl+C to stop)");

    let mut simulator = Simulator::new(config, TracingReporter)?;
    let stats = simulator.run_until(shutdown_signal()).await;

    info!(
        iterations = stats.iterations,
        delivered = stats.delivered,
        rejected = stats.rejected,
        failed = stats.failed,
        "simulation stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // without a signal handler the loop only ends via max_iterations
        warn!("Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}
