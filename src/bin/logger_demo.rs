use minimal_sns::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "minimal_sns=debug,logger_demo=debug".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!(user_id = 123456789, "application debug log");
    info!("application info log");

    Ok(())
}
