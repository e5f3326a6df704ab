use std::net::IpAddr;
use std::time::Duration;

/// One open port discovered by a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPort {
    pub port: u16,
    pub banner: String,
}

/// Final result of a scan, assembled once after every probe has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub target: IpAddr,
    pub ports_scanned: usize,
    /// Ascending by port number.
    pub open_ports: Vec<OpenPort>,
    pub elapsed: Duration,
}

impl ScanReport {
    /// Package unordered probe results into the final report, sorted
    /// ascending by port. Each port is probed at most once, so the sort key
    /// is unique.
    pub fn assemble(
        target: IpAddr,
        ports: &[u16],
        mut results: Vec<OpenPort>,
        elapsed: Duration,
    ) -> Self {
        results.sort_by_key(|r| r.port);
        Self {
            target,
            ports_scanned: ports.len(),
            open_ports: results,
            elapsed,
        }
    }

    pub fn open_count(&self) -> usize {
        self.open_ports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn open(port: u16, banner: &str) -> OpenPort {
        OpenPort {
            port,
            banner: banner.to_string(),
        }
    }

    #[test]
    fn assemble_sorts_by_port() {
        let results = vec![open(443, "HTTPS"), open(22, "SSH"), open(80, "HTTP")];
        let report = ScanReport::assemble(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            &[22, 80, 443, 8080],
            results,
            Duration::from_secs(1),
        );
        let ports: Vec<u16> = report.open_ports.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![22, 80, 443]);
        assert_eq!(report.ports_scanned, 4);
        assert_eq!(report.open_count(), 3);
    }

    #[test]
    fn assemble_is_deterministic() {
        let ports = [1, 2, 3];
        let results = vec![open(3, "c"), open(1, "a")];
        let target = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let a = ScanReport::assemble(target, &ports, results.clone(), Duration::from_millis(250));
        let b = ScanReport::assemble(target, &ports, results, Duration::from_millis(250));
        assert_eq!(a, b);
    }

    #[test]
    fn assemble_with_no_results() {
        let report = ScanReport::assemble(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            &[1, 2, 3],
            Vec::new(),
            Duration::ZERO,
        );
        assert!(report.open_ports.is_empty());
        assert_eq!(report.open_count(), 0);
        assert_eq!(report.ports_scanned, 3);
    }
}
