use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use netscan_rs::error::InputError;
use netscan_rs::targets::{build_work_set, expand_host, load_hosts_from_path};

fn temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("netscan-rs-test-{}-{}", std::process::id(), name));
    p
}

#[tokio::test]
async fn ipv4_literal_is_single_target() {
    let ips = expand_host("203.0.113.7").await.unwrap();
    assert_eq!(ips, vec![IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))]);
}

#[tokio::test]
async fn slash_30_block_expands_to_four_addresses() {
    // Inclusive policy: network and broadcast addresses are part of the block.
    let ips = expand_host("10.0.0.0/30").await.unwrap();
    assert_eq!(ips.len(), 4);
    assert_eq!(ips[0], IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
    assert_eq!(ips[3], IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3)));
}

#[tokio::test]
async fn block_cardinality_matches_prefix() {
    assert_eq!(expand_host("192.0.2.0/29").await.unwrap().len(), 8);
    assert_eq!(expand_host("192.0.2.0/32").await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_hosts_rejected_before_any_scan() {
    for bad in ["10.0.0.0/40", "999.1.1.1/24", "no-such-host.invalid"] {
        assert!(
            matches!(expand_host(bad).await, Err(InputError::InvalidHost(_))),
            "expected InvalidHost for {bad:?}"
        );
    }
}

#[tokio::test]
async fn hosts_file_parses_literals_and_skips_comments() {
    let path = temp_path("hosts-ok.txt");
    tokio::fs::write(&path, "# lab boxes\n10.0.0.5\n\n192.168.1.10  # gateway\n")
        .await
        .unwrap();

    let ips = load_hosts_from_path(&path).await.unwrap();
    assert_eq!(
        ips,
        vec![
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)),
        ]
    );

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn hosts_file_bad_line_fails_whole_run() {
    let path = temp_path("hosts-bad.txt");
    tokio::fs::write(&path, "10.0.0.5\nnot a hostname!!\n").await.unwrap();

    match load_hosts_from_path(&path).await {
        Err(InputError::InvalidInputFile { line, entry, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(entry, "not a hostname!!");
        }
        other => panic!("expected InvalidInputFile, got {other:?}"),
    }

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn missing_hosts_file_is_file_access_error() {
    let path = temp_path("does-not-exist.txt");
    assert!(matches!(
        load_hosts_from_path(&path).await,
        Err(InputError::FileAccess { .. })
    ));
}

#[tokio::test]
async fn work_set_covers_block_times_ports() {
    let addrs = expand_host("10.0.0.0/30").await.unwrap();
    let tasks = build_work_set(&addrs, &[22]);
    assert_eq!(tasks.len(), 4);
    assert!(tasks.iter().all(|t| t.port == 22));
}
