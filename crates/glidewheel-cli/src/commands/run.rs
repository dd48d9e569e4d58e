use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::watch;
use tracing::info;

use glidewheel_core::{platform, AppConfig, Error, SmoothScroller};

use crate::watcher::ConfigWatcher;

/// Install the wheel hook and keep smooth scrolling active until Ctrl+C
pub async fn run(config: AppConfig, config_path: PathBuf) -> Result<()> {
    let scroller = Arc::new(SmoothScroller::new(config.scroll.clone(), platform::native())?);

    match scroller.install() {
        Ok(()) => {}
        Err(Error::Unsupported) => {
            return Err(anyhow!(
                "glidewheel needs a global mouse hook, which is only available on Windows."
            ));
        }
        Err(e) => return Err(e.into()),
    }

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Setup signal handler for graceful shutdown
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let watcher = if config.general.watch_config {
        let watcher = ConfigWatcher::new(config_path.clone(), &config);
        Some(tokio::spawn(watcher.run(scroller.clone(), shutdown_rx.clone())))
    } else {
        None
    };

    println!("Smooth scrolling enabled. Press Ctrl+C to stop.");
    println!("  Config: {}", config_path.display());
    println!("  Step size: {}px", config.scroll.step_size);
    println!("  Animation time: {}ms", config.scroll.animation_time_ms);

    let mut shutdown = shutdown_rx;
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }

    if let Some(watcher) = watcher {
        let _ = watcher.await;
    }
    scroller.dispose();
    println!("Smooth scrolling stopped.");

    Ok(())
}
