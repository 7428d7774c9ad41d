use netscan_rs::error::InputError;
use netscan_rs::ports::parse_ports;

#[test]
fn range_spec_returns_exact_interval() {
    let ports = parse_ports("20-25").unwrap();
    assert_eq!(ports, vec![20, 21, 22, 23, 24, 25]);
}

#[test]
fn dash_means_all_ports() {
    let ports = parse_ports("-").unwrap();
    assert_eq!(ports.len(), 65535);
    assert_eq!(*ports.first().unwrap(), 1);
    assert_eq!(*ports.last().unwrap(), 65535);
}

#[test]
fn comma_list_kept_in_order() {
    assert_eq!(parse_ports("443,80,22").unwrap(), vec![443, 80, 22]);
}

#[test]
fn invalid_specs_fail_with_port_range_error() {
    for bad in ["443-80", "0-10", "1-65536", "65536", "eighty", "80;443", ""] {
        match parse_ports(bad) {
            Err(InputError::InvalidPortRange(spec)) => assert_eq!(spec, bad.trim()),
            other => panic!("expected InvalidPortRange for {bad:?}, got {other:?}"),
        }
    }
}
