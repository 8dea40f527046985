use orbit_icons_lib::logging::LogConfig;
use orbit_icons_lib::storage::LocalStorage;
use orbit_icons_lib::{IconConfig, IconPipeline};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

/// 初始化日志系统
fn init_logging() {
    let config = LogConfig::load(Path::new("."));

    if !config.enabled {
        // 日志已禁用，只初始化一个空的 subscriber
        let subscriber = tracing_subscriber::registry();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return;
    }

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(config.tracing_level().into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = IconConfig::default();
    let storage = Arc::new(LocalStorage::new(&config.output_dir)?);
    let pipeline = IconPipeline::new(config, storage);

    let report = pipeline.run()?;
    for failure in &report.failures {
        tracing::error!("尺寸 {}: {}", failure.size, failure.error);
    }

    if !report.is_success() {
        anyhow::bail!("{} 个尺寸生成失败", report.failures.len());
    }

    Ok(())
}
