/// Well-known service name for a port, from a small static table.
pub fn service_name(port: u16) -> Option<&'static str> {
    match port {
        21 => Some("FTP"),
        22 => Some("SSH"),
        23 => Some("Telnet"),
        25 => Some("SMTP"),
        53 => Some("DNS"),
        80 => Some("HTTP"),
        110 => Some("POP3"),
        143 => Some("IMAP"),
        443 => Some("HTTPS"),
        3306 => Some("MySQL"),
        3389 => Some("RDP"),
        5900 => Some("VNC"),
        8080 => Some("HTTP-Alt"),
        _ => None,
    }
}

/// Banner string for an open port.
///
/// With a non-empty greeting this is `"<name> (<first 50 chars>)"`, otherwise
/// just the service name, or `"unknown service"` for ports outside the table.
pub fn banner_label(port: u16, greeting: Option<&str>) -> String {
    let name = service_name(port).unwrap_or("unknown service");
    match greeting.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => {
            let snippet: String = text.chars().take(50).collect();
            format!("{name} ({snippet})")
        }
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_common_ports() {
        assert_eq!(service_name(22), Some("SSH"));
        assert_eq!(service_name(443), Some("HTTPS"));
        assert_eq!(service_name(8080), Some("HTTP-Alt"));
        assert_eq!(service_name(9999), None);
    }

    #[test]
    fn label_with_greeting() {
        assert_eq!(
            banner_label(22, Some("SSH-2.0-OpenSSH_9.6")),
            "SSH (SSH-2.0-OpenSSH_9.6)"
        );
    }

    #[test]
    fn label_without_greeting_is_bare_name() {
        assert_eq!(banner_label(80, None), "HTTP");
        assert_eq!(banner_label(9999, None), "unknown service");
    }

    #[test]
    fn blank_greeting_falls_back() {
        assert_eq!(banner_label(25, Some("   \r\n")), "SMTP");
    }

    #[test]
    fn unknown_port_keeps_greeting() {
        assert_eq!(banner_label(9999, Some("hello")), "unknown service (hello)");
    }

    #[test]
    fn greeting_truncated_to_fifty_chars() {
        let long = "x".repeat(80);
        let label = banner_label(21, Some(&long));
        assert_eq!(label, format!("FTP ({})", "x".repeat(50)));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let greeting: String = "é".repeat(60);
        let label = banner_label(21, Some(&greeting));
        assert_eq!(label, format!("FTP ({})", "é".repeat(50)));
    }
}
