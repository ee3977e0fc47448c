//! Command-line demonstration of the DiffServ scheduler crate.
//!
//! Builds an SPQ or DRR scheduler from an inline configuration, feeds it a
//! handful of synthetic packets, and logs each enqueue/dequeue decision.
//! Not part of the library's public API — a sanity check a reader can run
//! to see the scheduler behave, the same role `main.cc` plays over the
//! `DiffservTests` suite in the source this crate's algorithms are drawn
//! from.

use std::net::Ipv4Addr;
use std::sync::Arc;

use diffserv_qos::{build_scheduler, header::build_test_packet, scheduler_config_from_json, Framing};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diffserv_qos=debug,diffserv_demo=info".into()),
        )
        .init();

    let run_tests = std::env::args().any(|a| a == "--run-tests");
    if run_tests {
        println!("Running Diffserv unit tests...");
        println!("(run `cargo test` instead; this binary only demonstrates behavior)");
        return;
    }

    println!("Running Diffserv simulation...");

    let config_json = r#"{
        "kind": "DRR",
        "queues": [
            {"max_packets": 50, "dest_port": 6000, "is_default": false, "weight": 100},
            {"max_packets": 50, "dest_port": 0, "is_default": true, "weight": 50}
        ]
    }"#;

    let config = scheduler_config_from_json(config_json).expect("inline demo configuration is well-formed");
    let mut scheduler = build_scheduler(config, Framing::None).expect("demo configuration satisfies DRR requirements");

    let src = Ipv4Addr::new(10, 0, 0, 1);
    let dst = Ipv4Addr::new(10, 0, 0, 2);
    let packets = [
        (6000, 200usize), // high-weight class
        (9999, 64usize),  // falls through to the default class
        (6000, 200usize),
    ];

    for (dst_port, payload_len) in packets {
        let bytes = build_test_packet(src, dst, 17, 5555, dst_port, payload_len);
        let admitted = scheduler.enqueue(Arc::from(bytes));
        tracing::info!(dst_port, payload_len, admitted, "enqueued packet");
    }

    while let Some(packet) = scheduler.dequeue() {
        tracing::info!(len = packet.len(), "dequeued packet");
    }
}
