//! The fact collector and its per-fact fallback chains.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};

use crate::probe::exec;
use crate::probe::facts::{
    SystemFacts, UNKNOWN_CPU, UNKNOWN_DISTRO, UNKNOWN_HOSTNAME, UNKNOWN_RAM, UNKNOWN_TEMP,
};
use crate::probe::sources::Sources;

/// Probes host facts from shell utilities and well-known system files.
///
/// Each fact has an ordered chain of sources, tried until one yields a
/// non-empty trimmed string; a fact with no usable source gets its
/// placeholder. The resolved set is published as one immutable snapshot
/// through a watch channel, so readers never see a half-updated set and
/// observers get exactly one notification per completed fetch.
pub struct SystemInfoProbe {
    sources: Sources,
    tx: watch::Sender<SystemFacts>,
    /// Serializes fetches; refreshes run one at a time.
    gate: Mutex<()>,
    /// Set while a refresh is waiting its turn, so extra concurrent
    /// callers fold into the pending one instead of lining up.
    queued: AtomicBool,
}

impl SystemInfoProbe {
    /// Create a probe against the real system sources.
    ///
    /// The snapshot starts empty; call [`refresh`](Self::refresh) (or use
    /// [`init`](Self::init)) to populate it.
    pub fn new() -> Self {
        Self::with_sources(Sources::default())
    }

    /// Create a probe against custom sources.
    pub fn with_sources(sources: Sources) -> Self {
        let (tx, _) = watch::channel(SystemFacts::default());
        Self {
            sources,
            tx,
            gate: Mutex::new(()),
            queued: AtomicBool::new(false),
        }
    }

    /// Create a probe and run the initial fetch, like the process-start
    /// population described for this component.
    pub async fn init() -> Self {
        Self::init_with_sources(Sources::default()).await
    }

    /// Create a probe against custom sources and run the initial fetch.
    pub async fn init_with_sources(sources: Sources) -> Self {
        let probe = Self::with_sources(sources);
        probe.refresh().await;
        probe
    }

    /// Re-run the full fact collection and publish the new snapshot.
    ///
    /// Fetches are serialized: a second caller waits for the first to
    /// finish, and any callers beyond one already-waiting fold into that
    /// pending fetch and return without fetching again.
    pub async fn refresh(&self) {
        if self
            .queued
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("refresh already pending, folding into it");
            return;
        }

        let _gate = self.gate.lock().await;
        self.queued.store(false, Ordering::Release);

        let facts = self.collect_facts().await;
        self.tx.send_replace(facts);
    }

    /// The latest complete snapshot.
    pub fn facts(&self) -> SystemFacts {
        self.tx.borrow().clone()
    }

    /// Subscribe to change notifications; one notification per fetch.
    pub fn subscribe(&self) -> watch::Receiver<SystemFacts> {
        self.tx.subscribe()
    }

    /// The change notifications as a stream of snapshots.
    pub fn changes(&self) -> WatchStream<SystemFacts> {
        WatchStream::from_changes(self.tx.subscribe())
    }

    /// Host name.
    pub fn hostname(&self) -> String {
        self.tx.borrow().hostname.clone()
    }

    /// Distribution label.
    pub fn distro(&self) -> String {
        self.tx.borrow().distro.clone()
    }

    /// CPU model name.
    pub fn cpu_model(&self) -> String {
        self.tx.borrow().cpu_model.clone()
    }

    /// Used memory, `free -h` notation.
    pub fn ram_used(&self) -> String {
        self.tx.borrow().ram_used.clone()
    }

    /// Total memory, `free -h` notation.
    pub fn ram_total(&self) -> String {
        self.tx.borrow().ram_total.clone()
    }

    /// CPU temperature reading.
    pub fn cpu_temp(&self) -> String {
        self.tx.borrow().cpu_temp.clone()
    }

    /// Resolve all six facts, strictly one after another.
    async fn collect_facts(&self) -> SystemFacts {
        info!("collecting host facts");

        let hostname = self.resolve_hostname().await;
        let distro = self.resolve_distro().await;
        let cpu_model = self.resolve_cpu_model();
        let (ram_used, ram_total) = self.resolve_memory().await;
        let cpu_temp = self.resolve_cpu_temp().await;

        let facts = SystemFacts {
            hostname,
            distro,
            cpu_model,
            ram_used,
            ram_total,
            cpu_temp,
            fetched_at: Utc::now(),
        };

        info!(
            hostname = %facts.hostname,
            distro = %facts.distro,
            cpu = %facts.cpu_model,
            ram = %format!("{} / {}", facts.ram_used, facts.ram_total),
            temp = %facts.cpu_temp,
            "host facts collected"
        );

        facts
    }

    /// `hostname` command, then the first line of the host-identity file.
    async fn resolve_hostname(&self) -> String {
        if let Some(name) = non_empty(exec::run_shell(&self.sources.hostname_cmd).await) {
            return name;
        }
        if let Some(name) = read_first_line(&self.sources.hostname_file) {
            return name;
        }
        UNKNOWN_HOSTNAME.to_string()
    }

    /// PRETTY_NAME from the OS release descriptor, then `lsb_release -d`.
    async fn resolve_distro(&self) -> String {
        if let Some(label) = fs::read_to_string(&self.sources.os_release_file)
            .ok()
            .and_then(|contents| pretty_name(&contents))
        {
            return label;
        }
        if let Some(label) =
            lsb_description(&exec::run_shell(&self.sources.lsb_release_cmd).await)
        {
            return label;
        }
        UNKNOWN_DISTRO.to_string()
    }

    /// First "model name" line of the processor info pseudo-file.
    fn resolve_cpu_model(&self) -> String {
        fs::read_to_string(&self.sources.cpuinfo_file)
            .ok()
            .and_then(|contents| model_name(&contents))
            .unwrap_or_else(|| UNKNOWN_CPU.to_string())
    }

    /// Mem: row of the memory summary, split into used and total.
    async fn resolve_memory(&self) -> (String, String) {
        mem_summary(&exec::run_shell(&self.sources.free_cmd).await)
            .as_deref()
            .and_then(split_used_total)
            .unwrap_or_else(|| (UNKNOWN_RAM.to_string(), UNKNOWN_RAM.to_string()))
    }

    /// Sensor labels tried in order: the package sensor, then AMD's Tdie,
    /// then the first core.
    async fn resolve_cpu_temp(&self) -> String {
        let report = exec::run_shell(&self.sources.sensors_cmd).await;
        for label in ["Package id 0:", "Tdie:", "Core 0:"] {
            if let Some(reading) = sensor_reading(&report, label) {
                return reading;
            }
        }
        UNKNOWN_TEMP.to_string()
    }
}

impl Default for SystemInfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Trimmed, whitespace-only counts as nothing.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First line of a file, trimmed; `None` for unreadable or blank.
fn read_first_line(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    non_empty(contents.lines().next().unwrap_or_default().to_string())
}

/// PRETTY_NAME value out of os-release contents, quotes stripped.
fn pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .and_then(|value| non_empty(value.trim().trim_matches('"').to_string()))
}

/// Description out of `lsb_release -d` output ("Description:\t...").
fn lsb_description(output: &str) -> Option<String> {
    let line = output.lines().next()?;
    let value = match line.split_once('\t') {
        Some((_, rest)) => rest,
        None => line.strip_prefix("Description:").unwrap_or(line),
    };
    non_empty(value.to_string())
}

/// First "model name" value out of cpuinfo contents.
fn model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .and_then(|(_, value)| non_empty(value.to_string()))
}

/// "used / total" out of the Mem: row of `free -h` output.
fn mem_summary(free_output: &str) -> Option<String> {
    let row = free_output.lines().find(|line| line.starts_with("Mem:"))?;
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    // free columns: total used free ...
    Some(format!("{} / {}", fields[2], fields[1]))
}

/// Split a "used / total" line on its slash.
fn split_used_total(line: &str) -> Option<(String, String)> {
    let (used, total) = line.split_once('/')?;
    Some((non_empty(used.to_string())?, non_empty(total.to_string())?))
}

/// The first token after a sensor label, e.g. "+36.0°C".
fn sensor_reading(report: &str, label: &str) -> Option<String> {
    report
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix(label))
        .and_then(|rest| rest.split_whitespace().next().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSORS_INTEL: &str = "\
coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +36.0°C  (high = +80.0°C, crit = +100.0°C)
Core 0:        +33.0°C  (high = +80.0°C, crit = +100.0°C)
Core 1:        +34.0°C  (high = +80.0°C, crit = +100.0°C)
";

    const SENSORS_AMD: &str = "\
k10temp-pci-00c3
Adapter: PCI adapter
Tdie:         +42.5°C  (high = +70.0°C)
Tctl:         +52.5°C
";

    const FREE_OUTPUT: &str = "\
               total        used        free      shared  buff/cache   available
Mem:           15.5G        3.2G        8.1G        512M        4.2G       11.8G
Swap:           2.0G          0B        2.0G
";

    #[test]
    fn pretty_name_strips_quotes() {
        let os_release = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\n";
        assert_eq!(
            pretty_name(os_release).as_deref(),
            Some("Debian GNU/Linux 12 (bookworm)")
        );
    }

    #[test]
    fn pretty_name_missing_field() {
        assert_eq!(pretty_name("NAME=Arch\nID=arch\n"), None);
    }

    #[test]
    fn lsb_description_splits_on_tab() {
        assert_eq!(
            lsb_description("Description:\tUbuntu 24.04 LTS").as_deref(),
            Some("Ubuntu 24.04 LTS")
        );
    }

    #[test]
    fn lsb_description_empty_output() {
        assert_eq!(lsb_description(""), None);
        assert_eq!(lsb_description("Description:\t "), None);
    }

    #[test]
    fn model_name_takes_first_match() {
        let cpuinfo = "\
processor\t: 0
model name\t: AMD Ryzen 7 5800X 8-Core Processor
processor\t: 1
model name\t: AMD Ryzen 7 5800X 8-Core Processor
";
        assert_eq!(
            model_name(cpuinfo).as_deref(),
            Some("AMD Ryzen 7 5800X 8-Core Processor")
        );
    }

    #[test]
    fn model_name_absent_on_arm_style_cpuinfo() {
        assert_eq!(model_name("processor\t: 0\nBogoMIPS\t: 108.00\n"), None);
    }

    #[test]
    fn mem_summary_reads_mem_row() {
        assert_eq!(mem_summary(FREE_OUTPUT).as_deref(), Some("3.2G / 15.5G"));
    }

    #[test]
    fn mem_summary_rejects_truncated_row() {
        assert_eq!(mem_summary("Mem: 15.5G\n"), None);
        assert_eq!(mem_summary(""), None);
    }

    #[test]
    fn split_used_total_on_slash() {
        assert_eq!(
            split_used_total("3.2G / 15.5G"),
            Some(("3.2G".to_string(), "15.5G".to_string()))
        );
    }

    #[test]
    fn split_used_total_needs_both_halves() {
        assert_eq!(split_used_total("3.2G / "), None);
        assert_eq!(split_used_total("no slash here"), None);
    }

    #[test]
    fn sensor_reading_package_label() {
        assert_eq!(
            sensor_reading(SENSORS_INTEL, "Package id 0:").as_deref(),
            Some("+36.0°C")
        );
    }

    #[test]
    fn sensor_reading_falls_to_tdie_on_amd() {
        assert_eq!(sensor_reading(SENSORS_AMD, "Package id 0:"), None);
        assert_eq!(sensor_reading(SENSORS_AMD, "Tdie:").as_deref(), Some("+42.5°C"));
    }

    #[test]
    fn sensor_reading_core_label() {
        assert_eq!(
            sensor_reading(SENSORS_INTEL, "Core 0:").as_deref(),
            Some("+33.0°C")
        );
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert_eq!(non_empty("   \n\t".to_string()), None);
        assert_eq!(non_empty(" x ".to_string()).as_deref(), Some("x"));
    }
}
