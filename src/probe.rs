use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time;

use crate::services;
use crate::types::OpenPort;

/// Outcome of probing a single port.
///
/// `Closed` covers every expected way a port can fail to answer: refused,
/// reset, unreachable, or timed out. `Error` is reserved for local faults
/// such as descriptor exhaustion; the coordinator logs those per port.
#[derive(Debug)]
pub enum ProbeOutcome {
    Open(OpenPort),
    Closed,
    Error(std::io::Error),
}

/// Probe one TCP port: connect bounded by `timeout`, then attempt a single
/// passive banner read bounded by the same timeout.
///
/// Never fails outward; the socket is dropped before returning on every
/// path.
pub async fn probe(addr: IpAddr, port: u16, timeout: Duration) -> ProbeOutcome {
    let sock = SocketAddr::new(addr, port);
    let stream = match time::timeout(timeout, TcpStream::connect(sock)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return if is_expected_network_error(&e) {
                ProbeOutcome::Closed
            } else {
                ProbeOutcome::Error(e)
            };
        }
        // Connect did not complete within the timeout.
        Err(_) => return ProbeOutcome::Closed,
    };

    let banner = read_banner(stream, port, timeout).await;
    ProbeOutcome::Open(OpenPort { port, banner })
}

/// Connect failures that just mean the port is not open.
fn is_expected_network_error(err: &std::io::Error) -> bool {
    use std::io::ErrorKind::*;
    matches!(
        err.kind(),
        ConnectionRefused
            | ConnectionReset
            | ConnectionAborted
            | TimedOut
            | HostUnreachable
            | NetworkUnreachable
            | NetworkDown
            | PermissionDenied
    )
}

/// Read up to 1024 bytes the service may send immediately on connect and
/// build the banner string. Empty reads, timeouts, read errors, and non-UTF8
/// payloads all fall back to the bare table name.
async fn read_banner(mut stream: TcpStream, port: u16, timeout: Duration) -> String {
    let mut buf = [0u8; 1024];
    let greeting = match time::timeout(timeout, stream.read(&mut buf)).await {
        Ok(Ok(n)) if n > 0 => std::str::from_utf8(&buf[..n]).ok(),
        _ => None,
    };
    services::banner_label(port, greeting)
}
