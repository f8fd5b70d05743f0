//! Threshold evaluation of a statistics snapshot.
//!
//! Four independent checks run in a fixed order: load average, memory, disk
//! and network. Every comparison is strictly greater-than, and a metric whose
//! total or capacity is zero is skipped.

use crate::snapshot::StatsSnapshot;
use std::fmt;

/// Bytes in one binary megabyte
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Bits in one binary megabit
pub const BITS_PER_MIBIT: u64 = 1024 * 1024;

/// Bytes in one decimal megabyte
pub const BYTES_PER_MB: u64 = 1_000_000;

/// Fixed alarm thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Absolute load average
    pub load_average: f64,
    /// Used/total memory ratio
    pub memory_usage: f64,
    /// Used/total disk ratio
    pub disk_usage: f64,
    /// Used/capacity network ratio
    pub network_usage: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            load_average: 30.0,
            memory_usage: 0.80,
            disk_usage: 0.90,
            network_usage: 0.90,
        }
    }
}

/// How the memory usage percentage is rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentRounding {
    /// Round the ratio * 100 to the nearest integer, halves away from zero
    Nearest,
    /// Integer division of used * 100 by total
    Floor,
}

/// Unit used to report free network bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandwidthUnit {
    /// Free bytes * 8 / 2^20
    Mebibit,
    /// Free bytes / 10^6
    DecimalMegabyte,
}

/// Display conventions for the computed values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalPolicy {
    pub memory_rounding: PercentRounding,
    pub network_unit: BandwidthUnit,
}

impl Default for EvalPolicy {
    fn default() -> Self {
        Self {
            memory_rounding: PercentRounding::Nearest,
            network_unit: BandwidthUnit::Mebibit,
        }
    }
}

/// A triggered threshold, rendered through `Display`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Load average as sent by the server, trailing zeros stripped
    LoadAverage(String),
    /// Memory usage percentage
    Memory(u64),
    /// Free disk space in binary megabytes
    Disk(u64),
    /// Free bandwidth in the policy's megabit unit
    Network(u64),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LoadAverage(value) => write!(f, "Load Average is too high: {}", value),
            Warning::Memory(percent) => write!(f, "Memory usage too high: {}%", percent),
            Warning::Disk(free_mb) => write!(f, "Free disk space is too low: {} Mb left", free_mb),
            Warning::Network(free_mbit) => {
                write!(f, "Network bandwidth usage high: {} Mbit/s available", free_mbit)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    thresholds: Thresholds,
    policy: EvalPolicy,
}

impl Evaluator {
    pub fn new(thresholds: Thresholds, policy: EvalPolicy) -> Self {
        Self { thresholds, policy }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn policy(&self) -> &EvalPolicy {
        &self.policy
    }

    /// Run all checks against a snapshot, in load, memory, disk, network order
    pub fn evaluate(&self, stats: &StatsSnapshot) -> Vec<Warning> {
        [
            self.check_load(stats),
            self.check_memory(stats),
            self.check_disk(stats),
            self.check_network(stats),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn check_load(&self, stats: &StatsSnapshot) -> Option<Warning> {
        if stats.load_average > self.thresholds.load_average {
            let shown = trim_trailing_zeros(&stats.load_average_text);
            Some(Warning::LoadAverage(shown.to_string()))
        } else {
            None
        }
    }

    fn check_memory(&self, stats: &StatsSnapshot) -> Option<Warning> {
        let usage = usage_ratio(stats.used_memory, stats.total_memory)?;
        if usage <= self.thresholds.memory_usage {
            return None;
        }

        let percent = match self.policy.memory_rounding {
            PercentRounding::Nearest => (usage * 100.0).round() as u64,
            PercentRounding::Floor => {
                (stats.used_memory as u128 * 100 / stats.total_memory as u128) as u64
            }
        };
        Some(Warning::Memory(percent))
    }

    fn check_disk(&self, stats: &StatsSnapshot) -> Option<Warning> {
        let usage = usage_ratio(stats.used_disk, stats.total_disk)?;
        if usage <= self.thresholds.disk_usage {
            return None;
        }

        let free = stats.total_disk.saturating_sub(stats.used_disk);
        Some(Warning::Disk(free / BYTES_PER_MIB))
    }

    fn check_network(&self, stats: &StatsSnapshot) -> Option<Warning> {
        let usage = usage_ratio(stats.network_used, stats.network_capacity)?;
        if usage <= self.thresholds.network_usage {
            return None;
        }

        let free = stats.network_capacity.saturating_sub(stats.network_used);
        let available = match self.policy.network_unit {
            BandwidthUnit::Mebibit => (free as u128 * 8 / BITS_PER_MIBIT as u128) as u64,
            BandwidthUnit::DecimalMegabyte => free / BYTES_PER_MB,
        };
        Some(Warning::Network(available))
    }
}

/// `None` when the denominator is zero, so the check is skipped
fn usage_ratio(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(used as f64 / total as f64)
    }
}

/// Strip trailing zeros and a dangling decimal point from a decimal string.
///
/// Strings without a decimal point are returned unchanged.
pub fn trim_trailing_zeros(value: &str) -> &str {
    if !value.contains('.') {
        return value;
    }
    value.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(line: &str) -> StatsSnapshot {
        StatsSnapshot::parse(line).unwrap()
    }

    fn render(warnings: &[Warning]) -> Vec<String> {
        warnings.iter().map(ToString::to_string).collect()
    }

    const TEN_GIB: u64 = 10 * 1024 * BYTES_PER_MIB;

    #[test]
    fn test_trim_trailing_zeros() {
        assert_eq!(trim_trailing_zeros("30.00"), "30");
        assert_eq!(trim_trailing_zeros("30.50"), "30.5");
        assert_eq!(trim_trailing_zeros("45"), "45");
        assert_eq!(trim_trailing_zeros("100"), "100");
        assert_eq!(trim_trailing_zeros("31.0"), "31");
    }

    #[test]
    fn test_healthy_snapshot_has_no_warnings() {
        let stats = snapshot("1.25,16000000000,8000000000,500000000000,100000000000,125000000,1000000");
        assert!(Evaluator::default().evaluate(&stats).is_empty());
    }

    #[test]
    fn test_load_average_warning_uses_server_text() {
        let stats = snapshot("31,16000000000,14000000000,500000000000,100000000000,125000000,1000000");
        let warnings = Evaluator::default().evaluate(&stats);
        assert_eq!(render(&warnings)[0], "Load Average is too high: 31");

        let stats = snapshot("30.50,16,1,100,1,100,1");
        let warnings = Evaluator::default().evaluate(&stats);
        assert_eq!(render(&warnings), vec!["Load Average is too high: 30.5"]);
    }

    #[test]
    fn test_values_at_threshold_do_not_warn() {
        let stats = snapshot("30.00,100,80,100,90,100,90");
        assert!(Evaluator::default().evaluate(&stats).is_empty());
    }

    #[test]
    fn test_memory_rounding_policies() {
        let stats = snapshot("1,1000,856,100,1,100,1");

        let nearest = Evaluator::default().evaluate(&stats);
        assert_eq!(render(&nearest), vec!["Memory usage too high: 86%"]);

        let floor = Evaluator::new(
            Thresholds::default(),
            EvalPolicy {
                memory_rounding: PercentRounding::Floor,
                ..EvalPolicy::default()
            },
        )
        .evaluate(&stats);
        assert_eq!(render(&floor), vec!["Memory usage too high: 85%"]);

        let stats = snapshot("1,100,85,100,1,100,1");
        assert_eq!(
            render(&Evaluator::default().evaluate(&stats)),
            vec!["Memory usage too high: 85%"]
        );
    }

    #[test]
    fn test_disk_warning_reports_binary_megabytes() {
        let used = TEN_GIB - 512 * BYTES_PER_MIB;
        let stats = snapshot(&format!("1,100,1,{},{},100,1", TEN_GIB, used));
        assert_eq!(
            render(&Evaluator::default().evaluate(&stats)),
            vec!["Free disk space is too low: 512 Mb left"]
        );
    }

    #[test]
    fn test_network_unit_policies() {
        let stats = snapshot("1,100,1,100,1,125000000,120000000");

        assert_eq!(
            render(&Evaluator::default().evaluate(&stats)),
            vec!["Network bandwidth usage high: 38 Mbit/s available"]
        );

        let decimal = Evaluator::new(
            Thresholds::default(),
            EvalPolicy {
                network_unit: BandwidthUnit::DecimalMegabyte,
                ..EvalPolicy::default()
            },
        )
        .evaluate(&stats);
        assert_eq!(
            render(&decimal),
            vec!["Network bandwidth usage high: 5 Mbit/s available"]
        );
    }

    #[test]
    fn test_zero_denominators_skip_checks() {
        let stats = snapshot("1,0,999,0,999,0,999");
        assert!(Evaluator::default().evaluate(&stats).is_empty());
    }

    #[test]
    fn test_used_above_total_saturates() {
        let stats = snapshot("1,100,200,100,200,100,200");
        assert_eq!(
            render(&Evaluator::default().evaluate(&stats)),
            vec![
                "Memory usage too high: 200%",
                "Free disk space is too low: 0 Mb left",
                "Network bandwidth usage high: 0 Mbit/s available",
            ]
        );
    }

    #[test]
    fn test_all_warnings_in_fixed_order() {
        let used_disk = TEN_GIB - 100 * BYTES_PER_MIB;
        let stats = snapshot(&format!(
            "45.10,1000,900,{},{},125000000,124000000",
            TEN_GIB, used_disk
        ));
        assert_eq!(
            render(&Evaluator::default().evaluate(&stats)),
            vec![
                "Load Average is too high: 45.1",
                "Memory usage too high: 90%",
                "Free disk space is too low: 100 Mb left",
                "Network bandwidth usage high: 7 Mbit/s available",
            ]
        );
    }
}
