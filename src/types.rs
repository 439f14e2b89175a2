//! 类型定义模块
//!
//! 定义了入站配置文档及其嵌套子文档的核心数据结构。
//! 协议、传输和安全三个轴向使用带标签的枚举建模，
//! 序列化结果与面板的 JSON 字段一一对应。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::XuiError;

/// 入站协议类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// VLESS 协议
    Vless,
    /// VMess 协议
    Vmess,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Vless => write!(f, "vless"),
            Protocol::Vmess => write!(f, "vmess"),
        }
    }
}

impl FromStr for Protocol {
    type Err = XuiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "vless" => Ok(Protocol::Vless),
            "vmess" => Ok(Protocol::Vmess),
            _ => Err(XuiError::invalid_parameter(
                "Invalid protocol value. Only `vless` and `vmess` are supported.",
            )),
        }
    }
}

/// 传输网络类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// WebSocket 传输
    Ws,
    /// TCP 传输
    Tcp,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Ws => write!(f, "ws"),
            Network::Tcp => write!(f, "tcp"),
        }
    }
}

impl FromStr for Network {
    type Err = XuiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ws" => Ok(Network::Ws),
            "tcp" => Ok(Network::Tcp),
            _ => Err(XuiError::invalid_parameter(
                "Invalid network value. Only `ws` and `tcp` are supported.",
            )),
        }
    }
}

/// 传输安全类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// 不加密
    None,
    /// TLS 加密
    Tls,
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Security::None => write!(f, "none"),
            Security::Tls => write!(f, "tls"),
        }
    }
}

impl FromStr for Security {
    type Err = XuiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Security::None),
            "tls" => Ok(Security::Tls),
            _ => Err(XuiError::invalid_parameter(
                "Invalid security value. Only `none` and `tls` are supported.",
            )),
        }
    }
}

/// 入站配置文档
///
/// 与面板交换的顶层实体。`id` 仅在从面板加载的文档中存在，
/// 新建的文档没有身份标识。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inbound {
    /// 面板分配的入站标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// 累计上行流量（字节）
    #[serde(default)]
    pub up: u64,
    /// 累计下行流量（字节）
    #[serde(default)]
    pub down: u64,
    /// 流量配额（字节），0 表示不限量
    #[serde(default)]
    pub total: u64,
    /// 显示名称
    pub remark: String,
    /// 是否启用
    pub enable: bool,
    /// 到期时间戳（毫秒），0 表示永不过期
    #[serde(rename = "expiryTime", default)]
    pub expiry_time: i64,
    /// 监听地址
    #[serde(default)]
    pub listen: String,
    /// 监听端口
    pub port: u16,
    /// 入站协议
    pub protocol: Protocol,
    /// 协议设置（客户端列表及协议相关字段）
    pub settings: Settings,
    /// 传输设置
    #[serde(rename = "streamSettings")]
    pub stream_settings: StreamSettings,
    /// 流量嗅探设置
    pub sniffing: Sniffing,
}

/// 协议设置子文档
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// 授权客户端列表
    pub clients: Vec<Client>,
    /// 协议相关字段
    #[serde(flatten)]
    pub protocol: ProtocolSettings,
}

/// 协议相关的设置字段
///
/// vless 与 vmess 的字段互斥，序列化时平铺进 `settings`。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProtocolSettings {
    /// VLESS 专有字段
    Vless(VlessSettings),
    /// VMess 专有字段
    Vmess(VmessSettings),
}

/// VLESS 协议设置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VlessSettings {
    /// 解密方式，固定为 none
    pub decryption: String,
    /// 回落配置
    #[serde(default)]
    pub fallbacks: Vec<serde_json::Value>,
}

impl Default for VlessSettings {
    fn default() -> Self {
        Self {
            decryption: "none".to_string(),
            fallbacks: Vec::new(),
        }
    }
}

/// VMess 协议设置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VmessSettings {
    /// 是否禁用不安全的加密方式
    #[serde(rename = "disableInsecureEncryption")]
    pub disable_insecure_encryption: bool,
}

/// 客户端记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    /// 客户端标识（UUID），创建时生成且不会被隐式重置
    pub id: String,
    /// 显示与查找用的邮箱，文档本身不保证唯一
    pub email: String,
    /// 同时在线 IP 限制，0 表示不限
    #[serde(rename = "limitIp")]
    pub limit_ip: u32,
    /// 流量配额（字节），0 表示不限量
    #[serde(rename = "totalGB")]
    pub total_gb: u64,
    /// 到期时间戳（毫秒），0 表示永不过期
    #[serde(rename = "expiryTime")]
    pub expiry_time: i64,
    /// 流控模式，仅 vless 客户端携带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// 额外 ID，仅 vmess 客户端携带
    #[serde(rename = "alterId", default, skip_serializing_if = "Option::is_none")]
    pub alter_id: Option<u32>,
}

/// 传输设置子文档
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamSettings {
    /// 传输网络类型
    pub network: Network,
    /// 传输安全类型
    pub security: Security,
    /// 网络相关的传输配置，与 `network` 保持一致
    #[serde(flatten)]
    pub transport: TransportSettings,
    /// TLS 配置，仅在 `security` 为 tls 时存在
    #[serde(
        rename = "tlsSettings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tls: Option<TlsSettings>,
}

/// 网络相关的传输配置
///
/// 序列化为 `wsSettings` 或 `tcpSettings`，二者互斥。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TransportSettings {
    /// WebSocket 传输配置
    #[serde(rename = "wsSettings")]
    Ws(WsSettings),
    /// TCP 传输配置
    #[serde(rename = "tcpSettings")]
    Tcp(TcpSettings),
}

impl TransportSettings {
    /// 获取 WebSocket 传输配置
    pub fn ws(&self) -> Option<&WsSettings> {
        match self {
            TransportSettings::Ws(ws) => Some(ws),
            TransportSettings::Tcp(_) => None,
        }
    }

    /// 获取 TCP 传输配置
    pub fn tcp(&self) -> Option<&TcpSettings> {
        match self {
            TransportSettings::Ws(_) => None,
            TransportSettings::Tcp(tcp) => Some(tcp),
        }
    }
}

/// WebSocket 传输配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WsSettings {
    /// 是否接受 PROXY protocol
    #[serde(rename = "acceptProxyProtocol")]
    pub accept_proxy_protocol: bool,
    /// WebSocket 路径
    pub path: String,
    /// 自定义请求头，始终序列化为对象
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for WsSettings {
    fn default() -> Self {
        Self {
            accept_proxy_protocol: false,
            path: "/".to_string(),
            headers: HashMap::new(),
        }
    }
}

/// TCP 传输配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TcpSettings {
    /// 是否接受 PROXY protocol
    #[serde(rename = "acceptProxyProtocol")]
    pub accept_proxy_protocol: bool,
    /// 伪装头设置
    pub header: TcpHeader,
}

impl Default for TcpSettings {
    fn default() -> Self {
        Self {
            accept_proxy_protocol: false,
            header: TcpHeader::default(),
        }
    }
}

/// TCP 伪装头设置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TcpHeader {
    /// 伪装类型
    #[serde(rename = "type")]
    pub header_type: String,
    /// HTTP 伪装请求配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<TcpRequest>,
}

impl Default for TcpHeader {
    fn default() -> Self {
        Self {
            header_type: "none".to_string(),
            request: None,
        }
    }
}

/// TCP HTTP 伪装请求配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TcpRequest {
    /// 请求路径列表
    #[serde(default)]
    pub path: Vec<String>,
    /// 请求头，值为列表
    #[serde(default)]
    pub headers: HashMap<String, Vec<String>>,
}

/// TLS 配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TlsSettings {
    /// 证书对应的服务器名称
    #[serde(rename = "serverName")]
    pub server_name: String,
    /// 证书与私钥文件
    pub certificates: Vec<Certificate>,
    /// ALPN 协议列表
    #[serde(default)]
    pub alpn: Vec<String>,
}

impl TlsSettings {
    /// 创建带单对证书文件的 TLS 配置
    pub fn new(server_name: &str, certificate_file: &str, key_file: &str) -> Self {
        Self {
            server_name: server_name.to_string(),
            certificates: vec![Certificate {
                certificate_file: certificate_file.to_string(),
                key_file: key_file.to_string(),
            }],
            alpn: Vec::new(),
        }
    }
}

/// 证书文件对
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Certificate {
    /// 证书文件路径
    #[serde(rename = "certificateFile")]
    pub certificate_file: String,
    /// 私钥文件路径
    #[serde(rename = "keyFile")]
    pub key_file: String,
}

/// 流量嗅探设置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sniffing {
    /// 是否启用嗅探
    pub enabled: bool,
    /// 目标地址重写协议列表
    #[serde(rename = "destOverride")]
    pub dest_override: Vec<String>,
}

impl Default for Sniffing {
    fn default() -> Self {
        Self {
            enabled: true,
            dest_override: vec!["http".to_string(), "tls".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_serialization() {
        let protocol = Protocol::Vless;
        let json = serde_json::to_string(&protocol).unwrap();
        assert_eq!(json, "\"vless\"");

        let deserialized: Protocol = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Protocol::Vless);
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("vmess".parse::<Protocol>().unwrap(), Protocol::Vmess);
        assert_eq!("ws".parse::<Network>().unwrap(), Network::Ws);
        assert_eq!("tls".parse::<Security>().unwrap(), Security::Tls);

        assert!("socks".parse::<Protocol>().is_err());
        assert!("grpc".parse::<Network>().is_err());
        assert!("reality".parse::<Security>().is_err());
    }

    #[test]
    fn test_transport_settings_serialization() {
        let stream = StreamSettings {
            network: Network::Ws,
            security: Security::None,
            transport: TransportSettings::Ws(WsSettings::default()),
            tls: None,
        };

        let value = serde_json::to_value(&stream).unwrap();
        assert_eq!(value["network"], "ws");
        assert!(value.get("wsSettings").is_some());
        assert!(value.get("tcpSettings").is_none());
        assert!(value.get("tlsSettings").is_none());
        assert_eq!(value["wsSettings"]["path"], "/");
        assert!(value["wsSettings"]["headers"].is_object());
    }

    #[test]
    fn test_transport_settings_round_trip() {
        let stream = StreamSettings {
            network: Network::Tcp,
            security: Security::Tls,
            transport: TransportSettings::Tcp(TcpSettings::default()),
            tls: Some(TlsSettings::new("example.com", "/root/cert.crt", "/root/private.key")),
        };

        let json = serde_json::to_string(&stream).unwrap();
        let back: StreamSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stream);
        assert_eq!(back.transport.tcp().unwrap().header.header_type, "none");
    }

    #[test]
    fn test_protocol_settings_flatten() {
        let settings = Settings {
            clients: Vec::new(),
            protocol: ProtocolSettings::Vless(VlessSettings::default()),
        };

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["decryption"], "none");
        assert!(value["fallbacks"].is_array());
        assert!(value.get("disableInsecureEncryption").is_none());

        let back: Settings = serde_json::from_value(value).unwrap();
        assert!(matches!(back.protocol, ProtocolSettings::Vless(_)));
    }

    #[test]
    fn test_protocol_settings_vmess_deserialization() {
        let raw = r#"{"clients":[],"disableInsecureEncryption":false}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert!(matches!(settings.protocol, ProtocolSettings::Vmess(_)));
    }

    #[test]
    fn test_client_conditional_fields() {
        let client = Client {
            id: "uuid".to_string(),
            email: "a@b.com".to_string(),
            limit_ip: 2,
            total_gb: 0,
            expiry_time: 0,
            flow: None,
            alter_id: Some(0),
        };

        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["alterId"], 0);
        assert!(value.get("flow").is_none());
    }

    #[test]
    fn test_sniffing_default() {
        let sniffing = Sniffing::default();
        assert!(sniffing.enabled);
        assert_eq!(sniffing.dest_override, vec!["http", "tls"]);
    }
}
