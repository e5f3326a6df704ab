use std::collections::HashSet;
use thiserror::Error;

/// A port specification that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("invalid port value: {0:?}")]
    InvalidPort(String),
    #[error("invalid range {start}-{end} (start > end)")]
    ReversedRange { start: u16, end: u16 },
}

/// Parse a port specification into a deduplicated list of TCP ports.
///
/// The spec is a comma-separated list of tokens:
/// - single port number: `80`
/// - inclusive range: `8000-8100`
/// - whitespace around a token is ignored
///
/// Duplicates across tokens collapse; the first appearance wins. Values are
/// parsed as `u16`, so anything above 65535 is rejected as malformed. Port 0
/// is accepted and left to fail at connect time.
pub fn parse_port_spec(spec: &str) -> Result<Vec<u16>, PortSpecError> {
    let mut out: Vec<u16> = Vec::new();
    let mut seen = HashSet::new();

    for token in spec.split(',') {
        let token = token.trim();

        // Range `start-end`
        if let Some((a, b)) = token.split_once('-') {
            let start = parse_port(a.trim())?;
            let end = parse_port(b.trim())?;
            if start > end {
                return Err(PortSpecError::ReversedRange { start, end });
            }
            for p in start..=end {
                if seen.insert(p) {
                    out.push(p);
                }
            }
            continue;
        }

        // Single number
        let p = parse_port(token)?;
        if seen.insert(p) {
            out.push(p);
        }
    }

    Ok(out)
}

fn parse_port(s: &str) -> Result<u16, PortSpecError> {
    s.parse::<u16>()
        .map_err(|_| PortSpecError::InvalidPort(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_ports() {
        let ports = parse_port_spec("80,22, 443").unwrap();
        assert_eq!(ports, vec![80, 22, 443]);
    }

    #[test]
    fn parse_ranges_and_dedup() {
        let ports = parse_port_spec("8000-8002,80,8001").unwrap();
        assert_eq!(ports, vec![8000, 8001, 8002, 80]);
    }

    #[test]
    fn duplicate_singles_collapse() {
        let ports = parse_port_spec("80,80,81").unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports, vec![80, 81]);
    }

    #[test]
    fn default_range_expands_fully() {
        let ports = parse_port_spec("1-1024").unwrap();
        assert_eq!(ports.len(), 1024);
        assert_eq!(ports.first(), Some(&1));
        assert_eq!(ports.last(), Some(&1024));
    }

    #[test]
    fn non_numeric_token_rejected() {
        let err = parse_port_spec("not-a-port").unwrap_err();
        assert!(matches!(err, PortSpecError::InvalidPort(_)));
    }

    #[test]
    fn missing_range_bound_rejected() {
        assert!(matches!(
            parse_port_spec("5-").unwrap_err(),
            PortSpecError::InvalidPort(_)
        ));
        assert!(matches!(
            parse_port_spec("-5").unwrap_err(),
            PortSpecError::InvalidPort(_)
        ));
    }

    #[test]
    fn reversed_range_rejected() {
        let err = parse_port_spec("8080-80").unwrap_err();
        assert_eq!(err, PortSpecError::ReversedRange { start: 8080, end: 80 });
    }

    #[test]
    fn out_of_u16_rejected() {
        assert!(parse_port_spec("70000").is_err());
        assert!(parse_port_spec("1-70000").is_err());
    }

    #[test]
    fn port_zero_passes_through() {
        let ports = parse_port_spec("0,1").unwrap();
        assert_eq!(ports, vec![0, 1]);
    }

    #[test]
    fn empty_token_rejected() {
        assert!(parse_port_spec("").is_err());
        assert!(parse_port_spec("80,,443").is_err());
    }
}
