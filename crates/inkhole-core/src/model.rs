/// Canonical view of the appliance statistics a panel run displays.
///
/// Always fully populated: normalization either fills every field or
/// fails, so no partial summary ever reaches the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Distinct clients the appliance has seen today.
    pub unique_clients: u64,
    /// DNS queries blocked today.
    pub ads_blocked_today: u64,
    /// Whether blocking is currently enabled.
    pub blocking_enabled: bool,
}
