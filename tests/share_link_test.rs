use base64::{engine::general_purpose, Engine as _};
use xui_rs::{generate_link, HostData, InboundBuilder, Result, XuiError};

fn tls_ws_builder(protocol: &str) -> Result<InboundBuilder> {
    let mut builder = InboundBuilder::with_seed(13);

    builder
        .set_security("tls", Some("example.com"), None, None)?
        .set_network("ws")?
        .set_protocol(protocol)?
        .set_remark("share-node")
        .set_port(443)?
        .add_client("a@b.com", 0, 0, 0);

    // 已有身份标识的入站按邮箱解析客户端
    builder.inbound_mut().id = Some(1);

    Ok(builder)
}

#[test]
fn test_vless_share_link() -> Result<()> {
    let builder = tls_ws_builder("vless")?;
    let client_id = builder.get_client_id("a@b.com").unwrap().to_string();

    let link = generate_link(
        builder.inbound(),
        Some("a@b.com"),
        &HostData::new("1.2.3.4"),
        "",
    )?;

    assert!(link.starts_with(&format!("vless://{}@1.2.3.4:443?", client_id)));
    assert!(link.contains("type=ws"));
    assert!(link.contains("security=tls"));
    assert!(link.contains("&path=/"));
    assert!(link.contains("&host="));
    assert!(link.contains("&sni="));
    assert!(link.ends_with("#share-node"));

    Ok(())
}

#[test]
fn test_vmess_share_link() -> Result<()> {
    let builder = tls_ws_builder("vmess")?;
    let client_id = builder.get_client_id("a@b.com").unwrap().to_string();

    let link = generate_link(
        builder.inbound(),
        Some("a@b.com"),
        &HostData::new("1.2.3.4"),
        "",
    )?;

    let encoded = link.strip_prefix("vmess://").unwrap();
    let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&decoded)?;

    assert_eq!(payload["id"], client_id.as_str());
    assert_eq!(payload["tls"], "tls");
    assert_eq!(payload["add"], "1.2.3.4");
    assert_eq!(payload["port"], 443);
    assert_eq!(payload["ps"], "share-node");
    assert_eq!(payload["net"], "ws");

    Ok(())
}

#[test]
fn test_link_without_address_fails() -> Result<()> {
    let builder = tls_ws_builder("vless")?;

    let result = generate_link(builder.inbound(), Some("a@b.com"), &HostData::default(), "");
    assert!(matches!(result, Err(XuiError::MissingField(_))));

    Ok(())
}

#[test]
fn test_link_strips_scheme_and_port_from_address() -> Result<()> {
    let builder = tls_ws_builder("vless")?;

    let link = generate_link(
        builder.inbound(),
        Some("a@b.com"),
        &HostData::new("https://panel.example.com:2053/panel/"),
        "",
    )?;

    assert!(link.contains("@panel.example.com:443?"));

    Ok(())
}

#[test]
fn test_fresh_document_falls_back_to_default_client() -> Result<()> {
    let mut builder = InboundBuilder::with_seed(17);
    builder.set_port(8080)?.add_client("a@b.com", 0, 0, 0);

    let default_id = builder.get_default_client_id()?.to_string();
    let link = generate_link(
        builder.inbound(),
        Some("a@b.com"),
        &HostData::new("1.2.3.4"),
        "",
    )?;

    // 未保存的文档总是使用默认客户端的标识
    let encoded = link.strip_prefix("vmess://").unwrap();
    let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&decoded)?;
    assert_eq!(payload["id"], default_id.as_str());

    Ok(())
}

#[test]
fn test_custom_remark_overrides_document_remark() -> Result<()> {
    let builder = tls_ws_builder("vless")?;

    let link = generate_link(
        builder.inbound(),
        Some("a@b.com"),
        &HostData::new("1.2.3.4"),
        "promo",
    )?;

    assert!(link.ends_with("#promo"));

    Ok(())
}
