//! Health summary derived from `GET /status`.
//!
//! # Design
//! - The backend label is free text; map it once into a closed enum.
//! - Flag rows are derived so the card and the header badge agree.

use squidpanel_api_models::SystemStatus;

/// Aggregate health as rendered in badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverallStatus {
    /// Everything up and valid.
    Healthy,
    /// Degraded but running.
    Warning,
    /// Down or misconfigured.
    Error,
    /// Unrecognised label.
    Unknown,
}

impl OverallStatus {
    /// Map the backend `overall_status` label, case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "healthy" => Self::Healthy,
            "warning" => Self::Warning,
            "error" | "unhealthy" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// CSS modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Healthy => "ok",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }

    /// Translation key for the badge label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Healthy => "status.overall.healthy",
            Self::Warning => "status.overall.warning",
            Self::Error => "status.overall.error",
            Self::Unknown => "status.overall.unknown",
        }
    }
}

/// One boolean check shown on the status card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusFlag {
    /// Translation key for the row label.
    pub label_key: &'static str,
    /// Whether the check passed.
    pub ok: bool,
}

/// Rows for the container, process, and config checks.
#[must_use]
pub fn status_flags(status: &SystemStatus) -> [StatusFlag; 3] {
    [
        StatusFlag {
            label_key: "status.container",
            ok: status.container_running,
        },
        StatusFlag {
            label_key: "status.process",
            ok: status.squid_process_running,
        },
        StatusFlag {
            label_key: "status.config",
            ok: status.config_valid,
        },
    ]
}

/// Non-blank process listing lines.
#[must_use]
pub fn process_lines(status: &SystemStatus) -> Vec<&str> {
    status
        .squid_processes
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_case_insensitively() {
        assert_eq!(OverallStatus::from_label("Healthy"), OverallStatus::Healthy);
        assert_eq!(OverallStatus::from_label("WARNING"), OverallStatus::Warning);
        assert_eq!(OverallStatus::from_label("unhealthy"), OverallStatus::Error);
        assert_eq!(OverallStatus::from_label("error"), OverallStatus::Error);
        assert_eq!(OverallStatus::from_label(""), OverallStatus::Unknown);
    }

    #[test]
    fn flags_follow_status_fields() {
        let status = SystemStatus {
            container_running: true,
            squid_process_running: false,
            config_valid: true,
            ..SystemStatus::default()
        };
        let flags = status_flags(&status);
        assert!(flags[0].ok);
        assert!(!flags[1].ok);
        assert!(flags[2].ok);
    }

    #[test]
    fn process_listing_skips_blank_lines() {
        let status = SystemStatus {
            squid_processes: "proxy 1 squid\n\n  \nproxy 2 squid -N\n".into(),
            ..SystemStatus::default()
        };
        assert_eq!(
            process_lines(&status),
            vec!["proxy 1 squid", "proxy 2 squid -N"]
        );
    }
}
