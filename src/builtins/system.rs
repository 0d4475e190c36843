//! System Report Operation
//!
//! Collects OS, architecture, hostname, CPU count, and memory facts about
//! the host. Probes that a platform does not support simply come back
//! absent.

use super::BuiltinOp;
use crate::error::{Error, Result};
use serde::Serialize;

/// Snapshot of host facts
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub os: String,
    pub arch: String,
    pub family: String,
    pub hostname: String,
    pub cpu_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<usize>,
}

/// `sysinfo` builtin: print a host report, plain or as JSON
pub struct SysInfoOp;

impl SysInfoOp {
    pub fn new() -> Self {
        Self
    }

    /// Collect the report
    pub fn report() -> SystemReport {
        SystemReport {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            hostname: get_hostname(),
            cpu_count: get_cpu_count(),
            cpu_model: get_cpu_model(),
            memory_mb: get_memory_mb(),
        }
    }
}

impl Default for SysInfoOp {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinOp for SysInfoOp {
    fn name(&self) -> &str {
        "sysinfo"
    }

    fn description(&self) -> &str {
        "Report host system information (--json for machine-readable output)"
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let mut as_json = false;
        for arg in args {
            match arg.as_str() {
                "--json" => as_json = true,
                other => {
                    return Err(Error::InvalidArgument {
                        operation: "sysinfo".to_string(),
                        reason: format!("unknown argument '{}'", other),
                    })
                }
            }
        }

        let report = Self::report();
        if as_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("os:       {} ({})", report.os, report.arch);
            println!("family:   {}", report.family);
            println!("hostname: {}", report.hostname);
            println!("cpus:     {}", report.cpu_count);
            if let Some(model) = &report.cpu_model {
                println!("cpu:      {}", model);
            }
            match report.memory_mb {
                Some(mb) => println!("memory:   {} MB", mb),
                None => println!("memory:   unknown"),
            }
        }
        Ok(())
    }
}

/// Get system hostname
fn get_hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Get CPU count
fn get_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Get the CPU model name
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/proc/cpuinfo") {
            for line in content.lines() {
                if line.starts_with("model name") {
                    if let Some(name) = line.split(':').nth(1) {
                        return Some(name.trim().to_string());
                    }
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("sysctl")
            .args(["-n", "machdep.cpu.brand_string"])
            .output()
        {
            if let Ok(name) = String::from_utf8(output.stdout) {
                let name = name.trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(output) = std::process::Command::new("wmic")
            .args(["CPU", "get", "Name", "/Value"])
            .output()
        {
            if let Ok(output_str) = String::from_utf8(output.stdout) {
                for line in output_str.lines() {
                    if let Some(name) = line.strip_prefix("Name=") {
                        let name = name.trim();
                        if !name.is_empty() {
                            return Some(name.to_string());
                        }
                    }
                }
            }
        }
    }

    None
}

/// Get system memory in MB
fn get_memory_mb() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        // /proc/meminfo reports kilobytes
        if let Ok(content) = std::fs::read_to_string("/proc/meminfo") {
            for line in content.lines() {
                if line.starts_with("MemTotal:") {
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        if let Ok(kb) = kb_str.parse::<usize>() {
                            return Some(kb / 1024);
                        }
                    }
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("sysctl")
            .args(["-n", "hw.memsize"])
            .output()
        {
            if let Ok(mem_str) = String::from_utf8(output.stdout) {
                if let Ok(bytes) = mem_str.trim().parse::<usize>() {
                    return Some(bytes / (1024 * 1024));
                }
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(output) = std::process::Command::new("wmic")
            .args(["OS", "get", "TotalVisibleMemorySize", "/Value"])
            .output()
        {
            if let Ok(output_str) = String::from_utf8(output.stdout) {
                for line in output_str.lines() {
                    if let Some(value) = line.strip_prefix("TotalVisibleMemorySize=") {
                        if let Ok(kb) = value.trim().parse::<usize>() {
                            return Some(kb / 1024);
                        }
                    }
                }
            }
        }
    }

    None
}
