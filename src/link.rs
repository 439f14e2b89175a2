//! 分享链接生成模块
//!
//! 将入站配置文档和目标客户端编码为代理客户端可导入的
//! 连接 URI：vless 为查询参数形式的 URI，vmess 为 Base64
//! 编码的 JSON 负载。两种格式都是对外稳定的线上格式。

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::error::{Result, XuiError};
use crate::types::{Inbound, Network, Protocol, Security, TransportSettings};
use crate::utils::domain;

/// 生成链接时的主机信息
///
/// `address` 必填；`port` 与 `host` 缺省时分别回退到文档端口
/// 和文档中配置的 Host 请求头。
#[derive(Debug, Clone, Default)]
pub struct HostData {
    /// 连接地址
    pub address: String,
    /// 端口覆盖
    pub port: Option<u16>,
    /// Host 请求头与 SNI 覆盖
    pub host: Option<String>,
}

impl HostData {
    /// 创建只带地址的主机信息
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            port: None,
            host: None,
        }
    }

    /// 设置端口覆盖
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// 设置 Host 覆盖
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }
}

/// vmess 链接的 JSON 负载，字段顺序即序列化顺序
#[derive(Debug, Serialize)]
struct VmessPayload {
    v: &'static str,
    ps: String,
    add: String,
    port: u16,
    id: String,
    aid: u32,
    net: Network,
    #[serde(rename = "type")]
    header_type: String,
    sni: String,
    host: String,
    scy: &'static str,
    path: String,
    tls: Security,
}

/// 为指定客户端生成分享链接
///
/// `email` 选择目标客户端；已有身份标识的入站要求该客户端存在，
/// 新建文档则回退到默认客户端。`custom_remark` 非空时替换文档
/// 的显示名称。
///
/// # Examples
///
/// ```
/// use xui_rs::inbound::InboundBuilder;
/// use xui_rs::link::{generate_link, HostData};
///
/// # fn main() -> xui_rs::Result<()> {
/// let mut builder = InboundBuilder::new();
/// builder.set_port(443)?;
///
/// let link = generate_link(
///     builder.inbound(),
///     None,
///     &HostData::new("proxy.example.com"),
///     "",
/// )?;
/// assert!(link.starts_with("vmess://"));
/// # Ok(())
/// # }
/// ```
pub fn generate_link(
    inbound: &Inbound,
    email: Option<&str>,
    host_data: &HostData,
    custom_remark: &str,
) -> Result<String> {
    if host_data.address.is_empty() {
        return Err(XuiError::missing_field(
            "The hostData `address` field is missing",
        ));
    }

    let address = domain::host_only(&host_data.address)?;
    let remark = if custom_remark.is_empty() {
        inbound.remark.clone()
    } else {
        custom_remark.to_string()
    };

    let client = email.and_then(|email| inbound.get_client(email));
    let existing = inbound.id.is_some();

    let unique_id = if existing {
        client
            .map(|c| c.id.clone())
            .ok_or_else(|| {
                XuiError::not_found(format!(
                    "Client `{}` not found in inbound",
                    email.unwrap_or_default()
                ))
            })?
    } else {
        inbound.default_client_id()?.to_string()
    };

    // 传输相关的展示字段只对已有身份的入站解析
    let (path, host_header, header_type) = if existing {
        resolve_display_fields(inbound, host_data)
    } else {
        (None, None, None)
    };

    let port = host_data.port.unwrap_or(inbound.port);
    let network = inbound.stream_settings.network;
    let security = inbound.stream_settings.security;

    match inbound.protocol {
        Protocol::Vless => {
            let extra = match (&path, &host_header) {
                (Some(path), Some(host)) => match network {
                    Network::Ws => format!("&path={}&host={}&sni={}", path, host, host),
                    Network::Tcp => format!(
                        "&path={}&host={}&sni={}&headerType={}",
                        path,
                        host,
                        host,
                        header_type.as_deref().unwrap_or("none")
                    ),
                },
                _ => String::new(),
            };

            Ok(format!(
                "vless://{}@{}:{}?type={}&security={}{}#{}",
                unique_id, address, port, network, security, extra, remark
            ))
        }
        Protocol::Vmess => {
            let payload = VmessPayload {
                v: "2",
                ps: remark,
                add: address,
                port,
                id: unique_id,
                aid: client.and_then(|c| c.alter_id).unwrap_or(0),
                net: network,
                header_type: header_type.unwrap_or_else(|| "none".to_string()),
                sni: host_data
                    .host
                    .clone()
                    .or_else(|| host_header.clone())
                    .unwrap_or_default(),
                host: host_data.host.clone().or(host_header).unwrap_or_default(),
                scy: "auto",
                path: path.unwrap_or_else(|| "/".to_string()),
                tls: security,
            };

            let json = serde_json::to_string(&payload)?;

            Ok(format!(
                "vmess://{}",
                general_purpose::STANDARD.encode(json)
            ))
        }
    }
}

/// 按网络类型解析路径、Host 请求头和伪装类型
fn resolve_display_fields(
    inbound: &Inbound,
    host_data: &HostData,
) -> (Option<String>, Option<String>, Option<String>) {
    let transport = &inbound.stream_settings.transport;

    let path = match transport {
        TransportSettings::Ws(ws) => ws.path.clone(),
        TransportSettings::Tcp(tcp) => tcp
            .header
            .request
            .as_ref()
            .and_then(|request| request.path.first())
            .cloned()
            .unwrap_or_else(|| "/".to_string()),
    };

    let host = match host_data.host.as_deref().filter(|h| !h.is_empty()) {
        Some(host) => host.to_string(),
        None => match transport {
            TransportSettings::Ws(ws) => ws.headers.get("Host").cloned().unwrap_or_default(),
            TransportSettings::Tcp(tcp) => tcp
                .header
                .request
                .as_ref()
                .and_then(|request| request.headers.get("Host"))
                .and_then(|hosts| hosts.first())
                .cloned()
                .unwrap_or_default(),
        },
    };

    let header_type = match transport {
        TransportSettings::Ws(_) => "none".to_string(),
        TransportSettings::Tcp(tcp) => tcp.header.header_type.clone(),
    };

    (Some(path), Some(host), Some(header_type))
}
