//! Configuration of where each fact is probed from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The commands and files the collector consults, one field per source.
///
/// Defaults point at the real system sources; tests swap individual entries
/// for fakes to exercise the fallback chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    /// Command printing the host name
    pub hostname_cmd: String,
    /// File whose first line is the host name
    pub hostname_file: PathBuf,
    /// OS release descriptor file carrying PRETTY_NAME
    pub os_release_file: PathBuf,
    /// LSB release description command, tried when the file yields nothing
    pub lsb_release_cmd: String,
    /// Processor info pseudo-file carrying "model name" lines
    pub cpuinfo_file: PathBuf,
    /// Human-readable memory summary command
    pub free_cmd: String,
    /// Sensor report command carrying labeled temperature readings
    pub sensors_cmd: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            hostname_cmd: "hostname".to_string(),
            hostname_file: PathBuf::from("/etc/hostname"),
            os_release_file: PathBuf::from("/etc/os-release"),
            lsb_release_cmd: "lsb_release -d".to_string(),
            cpuinfo_file: PathBuf::from("/proc/cpuinfo"),
            free_cmd: "free -h".to_string(),
            sensors_cmd: "sensors".to_string(),
        }
    }
}

impl Sources {
    /// Set the hostname command.
    pub fn with_hostname_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.hostname_cmd = cmd.into();
        self
    }

    /// Set the hostname fallback file.
    pub fn with_hostname_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hostname_file = path.into();
        self
    }

    /// Set the OS release descriptor file.
    pub fn with_os_release_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release_file = path.into();
        self
    }

    /// Set the LSB release description command.
    pub fn with_lsb_release_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.lsb_release_cmd = cmd.into();
        self
    }

    /// Set the processor info file.
    pub fn with_cpuinfo_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpuinfo_file = path.into();
        self
    }

    /// Set the memory summary command.
    pub fn with_free_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.free_cmd = cmd.into();
        self
    }

    /// Set the sensor report command.
    pub fn with_sensors_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.sensors_cmd = cmd.into();
        self
    }
}
