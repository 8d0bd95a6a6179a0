//! The facts snapshot and its placeholder values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when no hostname source yields anything.
pub const UNKNOWN_HOSTNAME: &str = "Unknown";
/// Placeholder used when no distro source yields anything.
pub const UNKNOWN_DISTRO: &str = "Linux";
/// Placeholder used when the CPU model cannot be read.
pub const UNKNOWN_CPU: &str = "Unknown CPU";
/// Placeholder for each half of the memory reading.
pub const UNKNOWN_RAM: &str = "?";
/// Placeholder used when no temperature sensor label matches.
pub const UNKNOWN_TEMP: &str = "N/A";

/// One consistent set of host facts, replaced as a unit on every fetch.
///
/// After a fetch completes, every field holds either a real trimmed value or
/// its documented placeholder — never an empty string. Values are display
/// strings taken verbatim from whichever source answered first; no further
/// normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFacts {
    /// Host name, e.g. "workstation"
    pub hostname: String,
    /// Distribution label, e.g. "Debian GNU/Linux 12 (bookworm)"
    pub distro: String,
    /// CPU model name, e.g. "AMD Ryzen 7 5800X 8-Core Processor"
    pub cpu_model: String,
    /// Used memory in `free -h` notation, e.g. "3.2G"
    pub ram_used: String,
    /// Total memory in `free -h` notation, e.g. "15.5G"
    pub ram_total: String,
    /// CPU temperature as reported by `sensors`, e.g. "+36.0°C"
    pub cpu_temp: String,
    /// When this set of facts was collected
    pub fetched_at: DateTime<Utc>,
}

impl Default for SystemFacts {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            distro: String::new(),
            cpu_model: String::new(),
            ram_used: String::new(),
            ram_total: String::new(),
            cpu_temp: String::new(),
            fetched_at: Utc::now(),
        }
    }
}

impl SystemFacts {
    /// Whether every fact field carries a value (real or placeholder).
    ///
    /// Holds for any snapshot produced by a completed fetch; only the
    /// pre-first-fetch default has empty fields.
    pub fn is_populated(&self) -> bool {
        !self.hostname.is_empty()
            && !self.distro.is_empty()
            && !self.cpu_model.is_empty()
            && !self.ram_used.is_empty()
            && !self.ram_total.is_empty()
            && !self.cpu_temp.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unpopulated() {
        assert!(!SystemFacts::default().is_populated());
    }

    #[test]
    fn serializes_all_fields() {
        let facts = SystemFacts {
            hostname: "test-host".to_string(),
            distro: "Debian GNU/Linux 12 (bookworm)".to_string(),
            cpu_model: "Test CPU".to_string(),
            ram_used: "3.2G".to_string(),
            ram_total: "15.5G".to_string(),
            cpu_temp: "+36.0°C".to_string(),
            fetched_at: Utc::now(),
        };

        let json = serde_json::to_string(&facts).expect("should serialize");
        assert!(json.contains("test-host"));
        assert!(json.contains("3.2G"));

        let back: SystemFacts = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, facts);
    }
}
