use colored::{Color, Colorize};

use crate::types::ScanReport;

/// Blue `[*]` status line shown before the scan starts.
pub fn info_line(msg: &str, color: bool) -> String {
    paint(&format!("[*] {msg}"), Color::Blue, color)
}

/// Red `[!]` line for fatal errors.
pub fn error_line(msg: &str, color: bool) -> String {
    paint(&format!("[!] {msg}"), Color::Red, color)
}

/// Yellow `[!]` line for non-error notices such as an interrupted scan.
pub fn notice_line(msg: &str, color: bool) -> String {
    paint(&format!("[!] {msg}"), Color::Yellow, color)
}

/// Render the final report: summary lines, then a two-column PORT/SERVICE
/// table (ascending by port) or a "no open ports" notice.
pub fn render_report(report: &ScanReport, color: bool) -> String {
    let mut out = String::new();

    let title = format!("Scan results for {}", report.target);
    out.push_str(&bold_paint(&title, Color::Cyan, color));
    out.push('\n');
    out.push_str(&format!(
        "Total time: {} seconds\n",
        paint(&format!("{:.2}", report.elapsed.as_secs_f64()), Color::Green, color)
    ));
    out.push_str(&format!(
        "Ports scanned: {}\n",
        paint(&report.ports_scanned.to_string(), Color::Green, color)
    ));
    out.push_str(&format!(
        "Open ports: {}\n",
        paint(&report.open_count().to_string(), Color::Green, color)
    ));
    out.push('\n');

    if report.open_ports.is_empty() {
        out.push_str(&paint("No open ports found.", Color::Yellow, color));
        out.push('\n');
        return out;
    }

    let port_w = report
        .open_ports
        .iter()
        .map(|r| r.port.to_string().len())
        .max()
        .unwrap_or(0)
        .max("PORT".len());
    let svc_w = "SERVICE".len();

    let header = format!("{:<w$}  {}", "PORT", "SERVICE", w = port_w);
    out.push_str(&bold(&header, color));
    out.push('\n');
    out.push_str(&format!(
        "{:-<w$}  {:-<s$}\n",
        "",
        "",
        w = port_w,
        s = svc_w
    ));
    for entry in &report.open_ports {
        let row = format!("{:<w$}  {}", entry.port, entry.banner, w = port_w);
        out.push_str(&paint(&row, Color::Green, color));
        out.push('\n');
    }
    out
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn bold(text: &str, enabled: bool) -> String {
    if enabled {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn bold_paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).bold().to_string()
    } else {
        text.to_string()
    }
}
