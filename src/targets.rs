use crate::error::InputError;
use crate::types::ScanTask;
use ipnet::Ipv4Net;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use tokio::net::lookup_host;

/// Expand a host specifier into a concrete ordered list of addresses.
///
/// Three input shapes are recognized:
/// - an IPv4 dotted-quad literal, returned unchanged as a single address;
/// - a CIDR block (contains `/`), expanded to every address in the block,
///   network and broadcast addresses included (a /30 yields 4 addresses);
/// - anything else is treated as a domain name and resolved via system DNS,
///   returning all distinct resolved addresses in first-seen order.
///
/// Unparsable or unresolvable specifiers fail with [`InputError::InvalidHost`].
pub async fn expand_host(spec: &str) -> Result<Vec<IpAddr>, InputError> {
    let spec = spec.trim();

    if let Ok(ip) = spec.parse::<Ipv4Addr>() {
        return Ok(vec![IpAddr::V4(ip)]);
    }

    if spec.contains('/') {
        let net: Ipv4Net = spec
            .parse()
            .map_err(|_| InputError::InvalidHost(spec.to_string()))?;
        return Ok(expand_cidr(net));
    }

    resolve_domain(spec).await
}

/// Expand an IPv4 CIDR block into every address it covers, inclusive of the
/// network and broadcast addresses.
pub fn expand_cidr(net: Ipv4Net) -> Vec<IpAddr> {
    let start = u32::from(net.network());
    let end = u32::from(net.broadcast());
    (start..=end)
        .map(|n| IpAddr::V4(Ipv4Addr::from(n)))
        .collect()
}

/// Resolve a domain name to all of its distinct addresses via system DNS.
async fn resolve_domain(name: &str) -> Result<Vec<IpAddr>, InputError> {
    let addrs = lookup_host((name, 0u16))
        .await
        .map_err(|_| InputError::InvalidHost(name.to_string()))?;

    let mut out: Vec<IpAddr> = Vec::new();
    for sa in addrs {
        if !out.contains(&sa.ip()) {
            out.push(sa.ip());
        }
    }
    if out.is_empty() {
        return Err(InputError::InvalidHost(name.to_string()));
    }
    Ok(out)
}

/// Load scan targets from a file with one host per line.
///
/// Each line must be an IPv4 literal or a domain name; `#` comments and blank
/// lines are ignored. The policy for bad lines is fail, not skip: the first
/// entry that does not parse or resolve aborts the whole run with
/// [`InputError::InvalidInputFile`] naming the offending line. An unreadable
/// path fails with [`InputError::FileAccess`].
pub async fn load_hosts_from_path(path: impl AsRef<Path>) -> Result<Vec<IpAddr>, InputError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| InputError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut out: Vec<IpAddr> = Vec::new();
    for (idx, raw_line) in content.lines().enumerate() {
        let line = raw_line.split('#').next().map(str::trim).unwrap_or("");
        if line.is_empty() {
            continue;
        }

        if let Ok(ip) = line.parse::<Ipv4Addr>() {
            out.push(IpAddr::V4(ip));
            continue;
        }

        // CIDR blocks are only accepted on the command line, not in files.
        if line.contains('/') {
            return Err(InputError::InvalidInputFile {
                path: path.to_path_buf(),
                line: idx + 1,
                entry: line.to_string(),
            });
        }

        match resolve_domain(line).await {
            Ok(ips) => out.extend(ips),
            Err(_) => {
                return Err(InputError::InvalidInputFile {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    entry: line.to_string(),
                });
            }
        }
    }
    Ok(out)
}

/// Build the full work set: the Cartesian product of addresses and ports,
/// issued address-major. Duplicates in either input produce duplicate tasks.
pub fn build_work_set(addrs: &[IpAddr], ports: &[u16]) -> Vec<ScanTask> {
    let mut tasks = Vec::with_capacity(addrs.len() * ports.len());
    for &addr in addrs {
        for &port in ports {
            tasks.push(ScanTask { addr, port });
        }
    }
    tasks
}
