use crate::config::LoggingConfig;
use anyhow::Result;
use std::io;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 构建日志过滤器，`RUST_LOG` 优先于配置
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// 初始化日志系统
///
/// 这个函数会：
/// 1. 创建日志目录
/// 2. 设置按日期分割的文件日志
/// 3. 按配置决定是否同时输出到控制台
///
/// # 示例
/// ```no_run
/// use vitrina::config::LoggingConfig;
/// use vitrina::logging::init_logging;
///
/// init_logging(&LoggingConfig::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    // 创建日志目录
    std::fs::create_dir_all(&config.log_path)?;

    // 创建文件日志 appender（按日期分割）
    let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
    let (non_blocking, guard) = non_blocking(file_appender);

    let console = config
        .console_output
        .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

    tracing_subscriber::registry()
        .with(
            // 文件日志层
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // 文件中不使用颜色
                .with_target(false) // 不显示目标模块
                .with_thread_names(true)
                .and_then(console)
                .with_filter(build_filter(&config.level)),
        )
        .try_init()?;

    // guard 控制着日志写入器的生命周期，进程结束前不能释放
    std::mem::forget(guard);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_logging_creates_log_dir() {
        let dir = tempdir().unwrap();
        let config = LoggingConfig {
            log_path: dir.path().join("logs"),
            console_output: false,
            ..LoggingConfig::default()
        };

        init_logging(&config).unwrap();
        assert!(config.log_path.is_dir());
        tracing::info!("日志系统已初始化");
    }
}
