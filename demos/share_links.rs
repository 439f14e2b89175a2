//! 分享链接生成示例
//!
//! 演示如何为入站配置中的客户端生成 vless 和 vmess 分享链接。

use xui_rs::utils::quantity;
use xui_rs::{generate_link, HostData, InboundBuilder, Result};

fn main() -> Result<()> {
    xui_rs::init_default_logger();

    let mut builder = InboundBuilder::new();
    builder
        .set_security("tls", Some("example.com"), None, None)?
        .set_network("ws")?
        .set_protocol("vless")?
        .set_remark("demo-node")
        .set_port(443)?
        .add_client("user@example.com", 2, 50, 30);

    // 模拟面板已保存的入站，按邮箱选择客户端
    builder.inbound_mut().id = Some(1);

    let host_data = HostData::new("proxy.example.com").with_host("cdn.example.com");

    let vless = generate_link(builder.inbound(), Some("user@example.com"), &host_data, "")?;
    println!("vless link: {}", vless);

    builder.set_protocol("vmess")?.add_client("m@example.com", 0, 0, 0);
    let vmess = generate_link(builder.inbound(), Some("m@example.com"), &host_data, "vmess-demo")?;
    println!("vmess link: {}", vmess);

    let client = builder.get_client("user@example.com").unwrap();
    println!(
        "client quota: {}",
        quantity::format_size(client.total_gb)
    );

    Ok(())
}
