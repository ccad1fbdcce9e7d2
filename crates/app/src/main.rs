use engine::{BalanceEngine, ResultEngine};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitbook={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = build_engine(&settings.engine)?;

    let Some(server_settings) = settings.server else {
        tracing::warn!("no server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let bind = server_settings.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

fn build_engine(config: &settings::Engine) -> ResultEngine<BalanceEngine> {
    let mut builder = BalanceEngine::builder();
    if let Some(secs) = config.join_grace_secs {
        builder = builder.join_grace_secs(secs)?;
    }
    if let Some(epsilon) = config.epsilon_minor {
        builder = builder.epsilon_minor(epsilon)?;
    }
    let engine = builder.build()?;
    tracing::debug!(?engine, "balance engine configured");
    Ok(engine)
}
