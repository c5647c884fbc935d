//! Best-effort local network context for the panel's first line.
//!
//! Both lookups are cosmetic: failures degrade the panel text, never
//! the run.

use std::net::UdpSocket;

/// The local address the OS would use to reach the appliance.
///
/// Binds an ephemeral UDP socket and "connects" it toward the
/// appliance; no packet is sent. `None` means the device currently has
/// no route, which the panel reports as a network problem.
pub fn local_ip(appliance_host: &str, port: u16) -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect((appliance_host, port)).ok()?;
    let addr = socket.local_addr().ok()?;
    Some(addr.ip().to_string())
}

/// The device hostname, read from `/etc/hostname`.
pub fn hostname() -> Option<String> {
    let raw = std::fs::read_to_string("/etc/hostname").ok()?;
    let name = raw.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_owned())
}
