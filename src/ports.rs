use crate::error::InputError;

/// Parse a port specifier into a concrete ordered list of TCP ports.
///
/// Supported shapes:
/// - `-` — the full range 1..=65535
/// - `A-B` — the inclusive range A..B (requires 1 <= A <= B <= 65535)
/// - `a,b,c` — exactly those ports (a single port is a one-element list)
///
/// Anything else fails with [`InputError::InvalidPortRange`].
pub fn parse_ports(spec: &str) -> Result<Vec<u16>, InputError> {
    let spec = spec.trim();

    if spec == "-" {
        return Ok((1..=65535).collect());
    }

    if let Some((a, b)) = spec.split_once('-') {
        let start = parse_port(a.trim(), spec)?;
        let end = parse_port(b.trim(), spec)?;
        if start > end {
            return Err(InputError::InvalidPortRange(spec.to_string()));
        }
        return Ok((start..=end).collect());
    }

    spec.split(',')
        .map(|p| parse_port(p.trim(), spec))
        .collect()
}

fn parse_port(s: &str, spec: &str) -> Result<u16, InputError> {
    let val: u32 = s
        .parse()
        .map_err(|_| InputError::InvalidPortRange(spec.to_string()))?;
    if val == 0 || val > 65535 {
        return Err(InputError::InvalidPortRange(spec.to_string()));
    }
    Ok(val as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_dash() {
        let ports = parse_ports("-").unwrap();
        assert_eq!(ports.len(), 65535);
        assert_eq!(ports[0], 1);
        assert_eq!(ports[65534], 65535);
    }

    #[test]
    fn inclusive_range() {
        let ports = parse_ports("8000-8002").unwrap();
        assert_eq!(ports, vec![8000, 8001, 8002]);
    }

    #[test]
    fn single_port_and_list() {
        assert_eq!(parse_ports("443").unwrap(), vec![443]);
        assert_eq!(parse_ports("80,443,8080").unwrap(), vec![80, 443, 8080]);
        assert_eq!(parse_ports(" 80, 443 ").unwrap(), vec![80, 443]);
    }

    #[test]
    fn reversed_range_rejected() {
        assert!(matches!(
            parse_ports("443-80"),
            Err(InputError::InvalidPortRange(_))
        ));
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(parse_ports("0").is_err());
        assert!(parse_ports("70000").is_err());
        assert!(parse_ports("1-70000").is_err());
        assert!(parse_ports("80,0").is_err());
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_ports("http").is_err());
        assert!(parse_ports("").is_err());
        assert!(parse_ports("80,,443").is_err());
    }
}
