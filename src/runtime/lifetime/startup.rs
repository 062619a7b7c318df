use crate::errors::TrackingError;
use crate::events::{build_publisher, event_types};
use crate::services::TrackingService;
use crate::storage::{SeaOrmStorage, StorageFactory};
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tracing::{debug, info};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub tracking_service: Arc<TrackingService>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）与 tracking 服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let publisher = build_publisher();
    info!(
        "Registered {} handler(s) for '{}'",
        publisher.handler_count(event_types::TRACKING_EVENT_RECORDED),
        event_types::TRACKING_EVENT_RECORDED
    );

    let tracking_service = Arc::new(TrackingService::new(storage.clone(), publisher));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        tracking_service,
    })
}

/// 启动失败时的终端输出
///
/// A `TrackingError` anywhere in the chain is shown with its code and type;
/// the outer context lines are listed above it.
pub fn format_startup_error(err: &anyhow::Error) -> String {
    let Some(tracking_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<TrackingError>())
    else {
        return format!("{} {:#}", "[ERROR]".red().bold(), err);
    };

    let context: Vec<String> = err
        .chain()
        .take_while(|cause| cause.downcast_ref::<TrackingError>().is_none())
        .map(|cause| cause.to_string())
        .collect();

    if context.is_empty() {
        tracking_err.format_colored()
    } else {
        format!("{}\n{}", context.join(": "), tracking_err.format_colored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_startup_error_shows_tracking_error() {
        colored::control::set_override(false);
        let err = anyhow::Error::new(TrackingError::database_config("bad url"))
            .context("Failed to create storage backend");

        let text = format_startup_error(&err);
        assert!(text.starts_with("Failed to create storage backend\n"));
        assert!(text.contains("E004"));
        assert!(text.contains("bad url"));
    }

    #[test]
    fn test_format_startup_error_plain() {
        colored::control::set_override(false);
        let err = anyhow::anyhow!("Failed to bind 0.0.0.0:8000");
        assert_eq!(format_startup_error(&err), "[ERROR] Failed to bind 0.0.0.0:8000");
    }
}
