use std::io;

use tokio::select;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

async fn stop_signal() -> io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    select! {
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
    }

    Ok(())
}

/// Returns a token cancelled on SIGINT/SIGTERM (or by hand) and a tracker
/// that closes at the same moment, so `wait` returns once tracked tasks end.
pub fn bind() -> (CancellationToken, TaskTracker) {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let tracker = TaskTracker::new();
    let tracker_clone = tracker.clone();

    tokio::spawn(async move {
        select! {
            result = stop_signal() => {
                if let Err(err) = result {
                    error!("cannot listen for stop signals: {}", err);
                    token_clone.cancelled().await;
                }
            }
            _ = token_clone.cancelled() => (),
        }

        token_clone.cancel();
        tracker_clone.close();
    });

    (token, tracker)
}
