// Panel text formatting
//
// Produces the multi-line body the renderer draws and the change
// detector fingerprints. Deliberately excludes the "Updated:" clock
// footer -- that changes every run and would defeat the fingerprint,
// so the renderer adds it outside the hashed content.

use crate::model::Summary;

/// Network context for the panel's first line.
#[derive(Debug, Clone, Default)]
pub struct NetContext {
    /// Device hostname, when known.
    pub hostname: Option<String>,
    /// Name of the network interface being reported.
    pub interface: String,
    /// Local address on the route to the appliance; `None` means the
    /// device currently has no usable network path.
    pub ip: Option<String>,
}

/// Format the panel body: one status glyph per line.
pub fn format_dashboard(summary: &Summary, net: &NetContext) -> String {
    let mut lines = Vec::with_capacity(4);

    match net.ip {
        Some(ref ip) => {
            let label = net.hostname.as_deref().unwrap_or(&net.interface);
            lines.push(format!("[\u{2713}] IP of {label}: {ip}"));
        }
        None => lines.push("[\u{d7}] Can't connect to network".to_owned()),
    }

    if summary.blocking_enabled {
        lines.push("[\u{2713}] Pi-hole blocking enabled".to_owned());
    } else {
        lines.push("[\u{d7}] Pi-hole blocking disabled".to_owned());
    }

    lines.push(format!(
        "[\u{2713}] There are {} clients connected",
        summary.unique_clients
    ));
    lines.push(format!("[\u{2713}] Blocked {} ads", summary.ads_blocked_today));

    lines.join("\n")
}

/// Placeholder body shown when a run fails before producing a summary.
pub fn format_error(message: &str) -> String {
    format!("Error from API.\n{message}\nRun inkhole -v for details.")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary() -> Summary {
        Summary {
            unique_clients: 3,
            ads_blocked_today: 42,
            blocking_enabled: true,
        }
    }

    #[test]
    fn full_panel_with_network() {
        let net = NetContext {
            hostname: Some("raspberrypi".into()),
            interface: "wlan0".into(),
            ip: Some("192.168.1.50".into()),
        };

        assert_eq!(
            format_dashboard(&summary(), &net),
            "[\u{2713}] IP of raspberrypi: 192.168.1.50\n\
             [\u{2713}] Pi-hole blocking enabled\n\
             [\u{2713}] There are 3 clients connected\n\
             [\u{2713}] Blocked 42 ads"
        );
    }

    #[test]
    fn interface_label_when_hostname_unknown() {
        let net = NetContext {
            hostname: None,
            interface: "eth0".into(),
            ip: Some("10.0.0.2".into()),
        };

        let body = format_dashboard(&summary(), &net);
        assert!(body.starts_with("[\u{2713}] IP of eth0: 10.0.0.2"));
    }

    #[test]
    fn offline_and_disabled_lines() {
        let mut s = summary();
        s.blocking_enabled = false;
        let body = format_dashboard(&s, &NetContext::default());

        assert!(body.contains("[\u{d7}] Can't connect to network"));
        assert!(body.contains("[\u{d7}] Pi-hole blocking disabled"));
    }

    #[test]
    fn error_placeholder_carries_message() {
        let body = format_error("HTTP 500");
        assert!(body.starts_with("Error from API."));
        assert!(body.contains("HTTP 500"));
    }
}
