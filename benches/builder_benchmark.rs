//! 配置构建与链接生成性能基准测试

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xui_rs::{generate_link, HostData, InboundBuilder};

/// 基准测试完整的配置构建流程
fn bench_build_inbound(c: &mut Criterion) {
    c.bench_function("build_inbound", |b| {
        b.iter(|| {
            let mut builder = InboundBuilder::new();
            builder
                .set_security("tls", Some(black_box("example.com")), None, None)
                .unwrap()
                .set_network("ws")
                .unwrap()
                .set_protocol("vless")
                .unwrap()
                .set_remark(black_box("bench-node"))
                .set_port(443)
                .unwrap()
                .set_total(100)
                .set_expiry_time(30, true)
                .add_client("bench@example.com", 2, 10, 30);

            black_box(builder.to_json(true).unwrap())
        })
    });
}

/// 基准测试分享链接生成
fn bench_generate_link(c: &mut Criterion) {
    let mut builder = InboundBuilder::with_seed(1);
    builder
        .set_port(443)
        .unwrap()
        .add_client("bench@example.com", 0, 0, 0);
    builder.inbound_mut().id = Some(1);
    let inbound = builder.inbound().clone();
    let host_data = HostData::new("proxy.example.com");

    c.bench_function("generate_link", |b| {
        b.iter(|| {
            black_box(
                generate_link(
                    black_box(&inbound),
                    Some("bench@example.com"),
                    &host_data,
                    "",
                )
                .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_build_inbound, bench_generate_link);
criterion_main!(benches);
