//! # XUI RS SDK
//!
//! 一个用于构建和管理 x-ui 入站配置的 Rust SDK。
//! 提供协议感知的配置构建、客户端管理和分享链接生成功能。

pub mod error;
pub mod inbound;
pub mod link;
pub mod logger;
pub mod types;
pub mod utils;

// 重新导出主要的公共接口
pub use error::{ErrorCategory, Result, XuiError};
pub use inbound::{InboundBuilder, DEFAULT_CERTIFICATE_FILE, DEFAULT_KEY_FILE};
pub use link::{generate_link, HostData};
pub use types::{
    Certificate, Client, Inbound, Network, Protocol, ProtocolSettings, Security, Settings,
    Sniffing, StreamSettings, TcpHeader, TcpRequest, TcpSettings, TlsSettings, TransportSettings,
    VlessSettings, VmessSettings, WsSettings,
};

/// SDK 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化日志系统
///
/// # Arguments
///
/// * `config` - 日志配置，如果为None则使用默认配置
///
/// # Examples
///
/// ```
/// use xui_rs::logger::LoggerConfig;
///
/// // 使用默认配置
/// xui_rs::init_logger(None);
///
/// // 使用自定义配置
/// let config = LoggerConfig {
///     level: log::LevelFilter::Debug,
///     show_module: true,
///     ..Default::default()
/// };
/// xui_rs::init_logger(Some(config));
/// ```
pub fn init_logger(config: Option<logger::LoggerConfig>) {
    logger::init_logger(config);
}

/// 使用默认配置初始化日志系统
///
/// # Examples
///
/// ```
/// xui_rs::init_default_logger();
/// ```
pub fn init_default_logger() {
    logger::init_logger(None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }

    #[test]
    fn test_builder_default_document() {
        let builder = InboundBuilder::new();
        assert_eq!(builder.inbound().protocol, Protocol::Vmess);
    }
}
