//! 配置构建示例
//!
//! 演示如何创建入站配置文档并序列化为面板传输形式。

use xui_rs::{InboundBuilder, Result};

fn main() -> Result<()> {
    xui_rs::init_default_logger();

    let mut builder = InboundBuilder::new();

    builder
        .set_security("tls", Some("example.com"), None, None)?
        .set_network("ws")?
        .set_protocol("vless")?
        .set_remark("demo-node")
        .set_port(443)?
        .set_total(100)
        .set_expiry_time(30, true)
        .set_default_client("user@example.com", 2, 50, 30);

    // 结构化形式，便于检查
    println!("structured document:");
    println!("{}", serde_json::to_string_pretty(&builder.to_value(false)?)?);

    // 面板传输形式：嵌套子文档编码为字符串
    println!("\nwire document:");
    println!("{}", builder.to_json(true)?);

    Ok(())
}
