//! XUI RS 命令行工具
//!
//! 提供入站配置文档和分享链接的离线生成功能

use clap::{Parser, Subcommand};
use std::fs;

use xui_rs::logger::LoggerConfig;
use xui_rs::utils::id;
use xui_rs::{generate_link, init_logger, HostData, InboundBuilder, Result, XuiError};

/// XUI RS 命令行工具
#[derive(Parser)]
#[command(name = "xui-rs")]
#[command(about = "x-ui 入站配置与分享链接生成工具")]
#[command(version)]
struct Cli {
    /// 启用详细日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 生成入站配置文档
    Generate {
        /// 入站协议（vless 或 vmess）
        #[arg(short, long, default_value = "vmess")]
        protocol: String,
        /// 传输网络类型（ws 或 tcp）
        #[arg(short, long, default_value = "ws")]
        network: String,
        /// 传输安全类型（none 或 tls）
        #[arg(short, long, default_value = "none")]
        security: String,
        /// TLS 证书对应的服务器名称
        #[arg(long)]
        server_name: Option<String>,
        /// 显示名称
        #[arg(short, long)]
        remark: Option<String>,
        /// 监听端口，缺省时随机生成
        #[arg(long)]
        port: Option<u32>,
        /// 流量配额（GB），0 表示不限量
        #[arg(long, default_value = "0")]
        limit_gb: u64,
        /// 有效天数，0 表示永不过期
        #[arg(long, default_value = "0")]
        limit_days: i64,
        /// 默认客户端的邮箱
        #[arg(short, long)]
        email: Option<String>,
        /// 输出结构化形式而不是面板传输形式
        #[arg(long)]
        raw: bool,
    },
    /// 从存储的文档生成分享链接
    Link {
        /// 入站配置文档文件（面板原始格式）
        file: String,
        /// 连接地址
        #[arg(short, long)]
        address: String,
        /// 目标客户端的邮箱
        #[arg(short, long)]
        email: Option<String>,
        /// 端口覆盖
        #[arg(short, long)]
        port: Option<u16>,
        /// Host 请求头与 SNI 覆盖
        #[arg(long)]
        host: Option<String>,
        /// 替换显示名称
        #[arg(short, long, default_value = "")]
        remark: String,
    },
    /// 生成客户端标识
    Uuid {
        /// 16 字节种子的十六进制表示，用于确定性输出
        #[arg(short, long)]
        seed: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    init_logger(Some(LoggerConfig {
        level,
        ..Default::default()
    }));

    match cli.command {
        Commands::Generate {
            protocol,
            network,
            security,
            server_name,
            remark,
            port,
            limit_gb,
            limit_days,
            email,
            raw,
        } => generate_inbound(
            &protocol,
            &network,
            &security,
            server_name.as_deref(),
            remark.as_deref(),
            port,
            limit_gb,
            limit_days,
            email.as_deref(),
            raw,
        ),
        Commands::Link {
            file,
            address,
            email,
            port,
            host,
            remark,
        } => link_from_file(&file, &address, email.as_deref(), port, host.as_deref(), &remark),
        Commands::Uuid { seed } => print_uuid(seed.as_deref()),
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_inbound(
    protocol: &str,
    network: &str,
    security: &str,
    server_name: Option<&str>,
    remark: Option<&str>,
    port: Option<u32>,
    limit_gb: u64,
    limit_days: i64,
    email: Option<&str>,
    raw: bool,
) -> Result<()> {
    let mut builder = InboundBuilder::new();

    builder
        .set_security(security, server_name, None, None)?
        .set_network(network)?
        .set_protocol(protocol)?
        .set_total(limit_gb)
        .set_expiry_time(limit_days, true);

    if let Some(remark) = remark {
        builder.set_remark(remark);
    }

    if let Some(port) = port {
        builder.set_port(port)?;
    }

    if let Some(email) = email {
        builder.set_default_client(email, 0, limit_gb, limit_days);
    }

    let value = builder.to_value(!raw)?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn link_from_file(
    file: &str,
    address: &str,
    email: Option<&str>,
    port: Option<u16>,
    host: Option<&str>,
    remark: &str,
) -> Result<()> {
    let content = fs::read_to_string(file)
        .map_err(|e| XuiError::internal(format!("Failed to read document file: {}", e)))?;

    let mut builder = InboundBuilder::new();
    builder.load_json(&content)?;

    let mut host_data = HostData::new(address);
    host_data.port = port;
    host_data.host = host.map(|h| h.to_string());

    let link = generate_link(builder.inbound(), email, &host_data, remark)?;
    println!("{}", link);

    Ok(())
}

fn print_uuid(seed: Option<&str>) -> Result<()> {
    let uuid = match seed {
        Some(hex) => {
            let bytes = decode_hex(hex)?;
            id::guid4(Some(&bytes))?
        }
        None => id::guid4(None)?,
    };

    println!("{}", uuid);

    Ok(())
}

fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(XuiError::invalid_parameter(
            "Seed must be an even-length hex string",
        ));
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| XuiError::invalid_parameter(format!("Invalid hex seed: {}", e)))
        })
        .collect()
}
