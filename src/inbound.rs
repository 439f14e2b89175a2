//! 入站配置构建模块
//!
//! 提供入站配置文档的创建、加载、修改和序列化功能。
//! 协议、传输和安全三个设置轴由对应的 setter 维护，
//! 每次选择都会安装匹配的子文档并拆除互斥的另一份，
//! 文档因此始终处于可直接序列化的自洽状态。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use crate::error::{Result, XuiError};
use crate::types::{
    Client, Inbound, Network, Protocol, ProtocolSettings, Security, Settings, Sniffing,
    StreamSettings, TcpSettings, TlsSettings, TransportSettings, VlessSettings, VmessSettings,
    WsSettings,
};
use crate::utils::{id, quantity};

/// 默认证书文件路径
pub const DEFAULT_CERTIFICATE_FILE: &str = "/root/cert.crt";
/// 默认私钥文件路径
pub const DEFAULT_KEY_FILE: &str = "/root/private.key";

/// 以编码字符串形式传输的嵌套子文档字段
const NESTED_DOCUMENTS: [&str; 3] = ["settings", "streamSettings", "sniffing"];

impl Inbound {
    /// 按邮箱查找客户端，多个匹配时返回最后一个
    pub fn get_client(&self, email: &str) -> Option<&Client> {
        self.settings.clients.iter().rev().find(|c| c.email == email)
    }

    /// 获取全部客户端
    pub fn get_clients(&self) -> &[Client] {
        &self.settings.clients
    }

    /// 按邮箱查找客户端标识
    pub fn get_client_id(&self, email: &str) -> Option<&str> {
        self.get_client(email).map(|c| c.id.as_str())
    }

    /// 获取默认客户端（索引 0）
    pub fn default_client(&self) -> Result<&Client> {
        self.settings
            .clients
            .first()
            .ok_or_else(|| XuiError::invalid_state("Inbound has no clients"))
    }

    /// 获取默认客户端标识
    pub fn default_client_id(&self) -> Result<&str> {
        Ok(self.default_client()?.id.as_str())
    }

    /// 将文档序列化为 JSON 值
    ///
    /// `sanitize` 为 true 时，`settings`、`streamSettings` 和 `sniffing`
    /// 三个子文档会被编码为 JSON 字符串，即面板接口期望的传输格式。
    pub fn to_value(&self, sanitize: bool) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;

        if sanitize {
            let object = value
                .as_object_mut()
                .ok_or_else(|| XuiError::internal("Inbound did not serialize to an object"))?;

            for key in NESTED_DOCUMENTS {
                let nested = object
                    .get(key)
                    .ok_or_else(|| XuiError::missing_field(key))?;
                let encoded = serde_json::to_string_pretty(nested)?;
                object.insert(key.to_string(), Value::String(encoded));
            }
        }

        Ok(value)
    }

    /// 将文档序列化为 JSON 字符串
    pub fn to_json(&self, sanitize: bool) -> Result<String> {
        let value = self.to_value(sanitize)?;
        serde_json::to_string(&value).map_err(XuiError::from)
    }
}

/// 入站配置构建器
///
/// 持有一份入站配置文档和一个可注入种子的随机数生成器。
/// 校验失败的 setter 不会修改文档。
///
/// # Examples
///
/// ```
/// use xui_rs::inbound::InboundBuilder;
///
/// # fn main() -> xui_rs::Result<()> {
/// let mut builder = InboundBuilder::new();
/// builder
///     .set_security("tls", Some("example.com"), None, None)?
///     .set_network("ws")?
///     .set_protocol("vless")?
///     .set_remark("edge-node")
///     .set_port(443)?
///     .add_client("user@example.com", 2, 50, 30);
///
/// let payload = builder.to_json(true)?;
/// assert!(payload.contains("edge-node"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InboundBuilder {
    /// 当前文档
    inbound: Inbound,
    /// 端口与客户端标识使用的随机数生成器
    rng: StdRng,
}

impl InboundBuilder {
    /// 创建新的构建器，应用初始化预设
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 创建使用确定性种子的构建器，用于可复现的测试
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// 创建指定协议的构建器
    pub fn with_protocol(protocol: &str) -> Result<Self> {
        let mut builder = Self::new();
        let timestamp = chrono::Utc::now().timestamp();

        builder
            .set_protocol(protocol)?
            .set_remark(&format!("{}-{}", protocol, timestamp));

        Ok(builder)
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut builder = Self {
            inbound: Self::default_inbound(0),
            rng,
        };
        builder.init();
        builder
    }

    /// 恢复结构默认值并重新应用初始化预设
    pub fn reset(&mut self) -> &mut Self {
        self.init();
        self
    }

    /// 初始化预设：vmess over ws，无加密，随机端口，一个占位客户端
    fn init(&mut self) {
        let port = self.rng.gen_range(1000u16..=65535);
        self.inbound = Self::default_inbound(port);
        self.add_client("", 0, 0, 0);
    }

    fn default_inbound(port: u16) -> Inbound {
        let timestamp = chrono::Utc::now().timestamp();

        Inbound {
            id: None,
            up: 0,
            down: 0,
            total: 0,
            remark: format!("vmess-{}", timestamp),
            enable: true,
            expiry_time: 0,
            listen: String::new(),
            port,
            protocol: Protocol::Vmess,
            settings: Settings {
                clients: Vec::new(),
                protocol: ProtocolSettings::Vmess(VmessSettings::default()),
            },
            stream_settings: StreamSettings {
                network: Network::Ws,
                security: Security::None,
                transport: TransportSettings::Ws(WsSettings::default()),
                tls: None,
            },
            sniffing: Sniffing::default(),
        }
    }

    /// 从 JSON 字符串加载面板返回的原始文档
    pub fn load_json(&mut self, raw: &str) -> Result<&mut Self> {
        let value: Value = serde_json::from_str(raw)?;
        self.load_value(value)
    }

    /// 从 JSON 值加载面板返回的原始文档
    ///
    /// 原始形式中 `settings`、`streamSettings` 和 `sniffing` 以编码字符串
    /// 传输，加载时解码为结构化形式。缺失任何一个子文档都会报错；
    /// 唯一的例外是缺失或为空的 `wsSettings.headers`，会被归一化为空对象。
    pub fn load_value(&mut self, mut value: Value) -> Result<&mut Self> {
        let object = value
            .as_object_mut()
            .ok_or_else(|| XuiError::invalid_parameter("Inbound document must be a JSON object"))?;

        for key in NESTED_DOCUMENTS {
            let field = object
                .get_mut(key)
                .ok_or_else(|| XuiError::missing_field(key))?;

            if let Value::String(encoded) = field {
                *field = serde_json::from_str(encoded)?;
            }
        }

        if let Some(ws) = object
            .get_mut("streamSettings")
            .and_then(|stream| stream.get_mut("wsSettings"))
            .and_then(|ws| ws.as_object_mut())
        {
            let empty = match ws.get("headers") {
                None | Some(Value::Null) => true,
                Some(Value::Object(map)) => map.is_empty(),
                Some(Value::Array(list)) => list.is_empty(),
                Some(Value::String(s)) => s.is_empty(),
                _ => false,
            };

            if empty {
                ws.insert("headers".to_string(), Value::Object(Map::new()));
            }
        }

        self.inbound = serde_json::from_value(value)?;
        log::debug!("Loaded inbound document: {}", self.inbound.remark);

        Ok(self)
    }

    /// 加载已解码的文档
    pub fn load(&mut self, inbound: Inbound) -> &mut Self {
        self.inbound = inbound;
        self
    }

    /// 设置传输网络类型
    ///
    /// 安装所选网络的传输子文档并移除另一种网络的子文档。
    pub fn set_network(&mut self, value: &str) -> Result<&mut Self> {
        let network: Network = value.parse()?;

        self.inbound.stream_settings.transport = match network {
            Network::Ws => TransportSettings::Ws(WsSettings::default()),
            Network::Tcp => TransportSettings::Tcp(TcpSettings::default()),
        };
        self.inbound.stream_settings.network = network;

        Ok(self)
    }

    /// 设置传输安全类型
    ///
    /// tls 需要非空的 `server_name`；证书与私钥路径缺省时使用固定的
    /// 占位路径。none 会移除已有的 TLS 子文档。
    pub fn set_security(
        &mut self,
        value: &str,
        server_name: Option<&str>,
        certificate_file: Option<&str>,
        key_file: Option<&str>,
    ) -> Result<&mut Self> {
        let security: Security = value.parse()?;

        match security {
            Security::Tls => {
                let server_name = match server_name {
                    Some(name) if !name.is_empty() => name,
                    _ => {
                        return Err(XuiError::invalid_parameter(
                            "Invalid serverName value. It can't be empty for tls.",
                        ))
                    }
                };

                self.inbound.stream_settings.tls = Some(TlsSettings::new(
                    server_name,
                    certificate_file.unwrap_or(DEFAULT_CERTIFICATE_FILE),
                    key_file.unwrap_or(DEFAULT_KEY_FILE),
                ));
            }
            Security::None => {
                self.inbound.stream_settings.tls = None;
            }
        }

        self.inbound.stream_settings.security = security;

        Ok(self)
    }

    /// 设置入站协议
    ///
    /// 安装所选协议的设置字段并移除另一种协议的字段。
    /// 已有客户端记录保留创建时的协议相关字段。
    pub fn set_protocol(&mut self, value: &str) -> Result<&mut Self> {
        let protocol: Protocol = value.parse()?;

        self.inbound.settings.protocol = match protocol {
            Protocol::Vless => ProtocolSettings::Vless(VlessSettings::default()),
            Protocol::Vmess => ProtocolSettings::Vmess(VmessSettings::default()),
        };
        self.inbound.protocol = protocol;

        Ok(self)
    }

    /// 设置显示名称
    pub fn set_remark(&mut self, value: &str) -> &mut Self {
        self.inbound.remark = value.to_string();
        self
    }

    /// 设置监听端口，合法范围 1 到 65535
    pub fn set_port(&mut self, value: u32) -> Result<&mut Self> {
        if !(1..=65535).contains(&value) {
            return Err(XuiError::invalid_parameter(
                "Invalid port number value. Port number only can between 1 to 65535.",
            ));
        }

        self.inbound.port = value as u16;

        Ok(self)
    }

    /// 设置流量配额，输入单位为 GB
    pub fn set_total(&mut self, gigabytes: u64) -> &mut Self {
        self.inbound.total = quantity::bytes_from_gb(gigabytes);
        self
    }

    /// 设置到期时间
    ///
    /// `in_days` 为 true 时输入按天数换算为毫秒时间戳，否则按原值存储。
    pub fn set_expiry_time(&mut self, value: i64, in_days: bool) -> &mut Self {
        self.inbound.expiry_time = if in_days {
            quantity::expiry_from_days(value)
        } else {
            value
        };
        self
    }

    /// 设置是否启用
    pub fn set_enable(&mut self, value: bool) -> &mut Self {
        self.inbound.enable = value;
        self
    }

    /// 设置监听地址
    pub fn set_listen(&mut self, value: &str) -> &mut Self {
        self.inbound.listen = value.to_string();
        self
    }

    /// 设置累计上行流量
    pub fn set_up(&mut self, value: u64) -> &mut Self {
        self.inbound.up = value;
        self
    }

    /// 设置累计下行流量
    pub fn set_down(&mut self, value: u64) -> &mut Self {
        self.inbound.down = value;
        self
    }

    /// 整体覆盖客户端列表，由调用方保证不变量
    pub fn set_clients(&mut self, clients: Vec<Client>) -> &mut Self {
        self.inbound.settings.clients = clients;
        self
    }

    /// 整体覆盖协议设置，由调用方保证不变量
    pub fn set_settings(&mut self, settings: Settings) -> &mut Self {
        self.inbound.settings = settings;
        self
    }

    /// 整体覆盖传输设置，由调用方保证不变量
    pub fn set_stream_settings(&mut self, stream_settings: StreamSettings) -> &mut Self {
        self.inbound.stream_settings = stream_settings;
        self
    }

    /// 整体覆盖嗅探设置
    pub fn set_sniffing(&mut self, sniffing: Sniffing) -> &mut Self {
        self.inbound.sniffing = sniffing;
        self
    }

    /// 追加一个新客户端
    ///
    /// 客户端标识在创建时生成，协议相关字段取决于当前协议。
    pub fn add_client(
        &mut self,
        email: &str,
        limit_ip: u32,
        limit_gb: u64,
        limit_days: i64,
    ) -> &mut Self {
        let client = self.create_client(email, limit_ip, limit_gb, limit_days);
        self.inbound.settings.clients.push(client);
        self
    }

    /// 覆盖默认客户端（索引 0），用于将占位客户端提升为正式客户端
    pub fn set_default_client(
        &mut self,
        email: &str,
        limit_ip: u32,
        limit_gb: u64,
        limit_days: i64,
    ) -> &mut Self {
        let client = self.create_client(email, limit_ip, limit_gb, limit_days);

        if self.inbound.settings.clients.is_empty() {
            self.inbound.settings.clients.push(client);
        } else {
            self.inbound.settings.clients[0] = client;
        }

        self
    }

    /// 按邮箱更新客户端
    ///
    /// 重写所有匹配记录的邮箱和限额字段。没有匹配时不做任何修改。
    pub fn update_client(
        &mut self,
        access_email: &str,
        limit_ip: u32,
        limit_gb: u64,
        limit_days: i64,
        new_email: Option<&str>,
    ) -> &mut Self {
        let total_gb = quantity::bytes_from_gb(limit_gb);
        let expiry_time = quantity::expiry_from_days(limit_days);
        let email = new_email.unwrap_or(access_email).to_string();

        for client in self
            .inbound
            .settings
            .clients
            .iter_mut()
            .filter(|c| c.email == access_email)
        {
            client.email = email.clone();
            client.limit_ip = limit_ip;
            client.total_gb = total_gb;
            client.expiry_time = expiry_time;
        }

        self
    }

    /// 按邮箱移除客户端，保留其余记录的顺序
    pub fn remove_client(&mut self, email: &str) -> &mut Self {
        self.inbound.settings.clients.retain(|c| c.email != email);
        self
    }

    /// 按邮箱查找客户端，多个匹配时返回最后一个
    pub fn get_client(&self, email: &str) -> Option<&Client> {
        self.inbound.get_client(email)
    }

    /// 获取全部客户端
    pub fn get_clients(&self) -> &[Client] {
        self.inbound.get_clients()
    }

    /// 按邮箱查找客户端标识
    pub fn get_client_id(&self, email: &str) -> Option<&str> {
        self.inbound.get_client_id(email)
    }

    /// 获取默认客户端
    pub fn get_default_client(&self) -> Result<&Client> {
        self.inbound.default_client()
    }

    /// 获取默认客户端标识
    pub fn get_default_client_id(&self) -> Result<&str> {
        self.inbound.default_client_id()
    }

    /// 重新生成默认客户端的标识
    pub fn reset_default_client_id(&mut self) -> Result<&mut Self> {
        let id = id::guid4_from_rng(&mut self.rng);
        let client = self
            .inbound
            .settings
            .clients
            .first_mut()
            .ok_or_else(|| XuiError::invalid_state("Inbound has no clients"))?;

        client.id = id;

        Ok(self)
    }

    /// 获取当前文档的引用
    pub fn inbound(&self) -> &Inbound {
        &self.inbound
    }

    /// 获取当前文档的可变引用
    pub fn inbound_mut(&mut self) -> &mut Inbound {
        &mut self.inbound
    }

    /// 取出当前文档
    pub fn into_inbound(self) -> Inbound {
        self.inbound
    }

    /// 将文档序列化为 JSON 值，见 [`Inbound::to_value`]
    pub fn to_value(&self, sanitize: bool) -> Result<Value> {
        self.inbound.to_value(sanitize)
    }

    /// 将文档序列化为 JSON 字符串，见 [`Inbound::to_json`]
    pub fn to_json(&self, sanitize: bool) -> Result<String> {
        self.inbound.to_json(sanitize)
    }

    fn create_client(&mut self, email: &str, limit_ip: u32, limit_gb: u64, limit_days: i64) -> Client {
        let mut client = Client {
            id: id::guid4_from_rng(&mut self.rng),
            email: email.to_string(),
            limit_ip,
            total_gb: quantity::bytes_from_gb(limit_gb),
            expiry_time: quantity::expiry_from_days(limit_days),
            flow: None,
            alter_id: None,
        };

        match self.inbound.protocol {
            Protocol::Vless => client.flow = Some("xtls-rprx-direct".to_string()),
            Protocol::Vmess => client.alter_id = Some(0),
        }

        client
    }
}

impl Default for InboundBuilder {
    fn default() -> Self {
        Self::new()
    }
}
