use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use viewgate::config::Config;
use viewgate::signal;

fn main() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    let path = env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(path).await?;
    info!("loaded {} routes", config.routes.len());

    let app = viewgate::app(&config)?;
    let (ct, tt) = signal::bind();

    {
        let signal = ct.clone().cancelled_owned();
        let addr = format!("{}:{}", config.http.host, config.http.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        let ct = ct.clone();

        tt.spawn(async move {
            info!("http server worker starting on {}", addr);
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                error!("http server worker error: {}", err);
            }

            ct.cancel();
        });
    }

    tt.wait().await;
    info!("http server stopped");
    Ok(())
}
