use std::time::Duration;

use serde::Serialize;

/// Default provisioned read units for a freshly created table.
pub const DEFAULT_READ_UNITS: i64 = 25;
/// Default provisioned write units for a freshly created table.
pub const DEFAULT_WRITE_UNITS: i64 = 25;
/// Default storage capacity in gigabytes for a freshly created table.
pub const DEFAULT_STORAGE_GB: i64 = 5;

/// Throughput and storage limits attached to the session table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    pub read_units: i64,
    pub write_units: i64,
    pub storage_gb: i64,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            read_units: DEFAULT_READ_UNITS,
            write_units: DEFAULT_WRITE_UNITS,
            storage_gb: DEFAULT_STORAGE_GB,
        }
    }
}

/// Partial limit change: omitted fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLimitChanges {
    pub read_units: Option<i64>,
    pub write_units: Option<i64>,
    pub storage_gb: Option<i64>,
}

impl TableLimitChanges {
    /// Overlay the supplied values on the current limits.
    pub fn overlay(self, current: TableLimits) -> TableLimits {
        TableLimits {
            read_units: self.read_units.unwrap_or(current.read_units),
            write_units: self.write_units.unwrap_or(current.write_units),
            storage_gb: self.storage_gb.unwrap_or(current.storage_gb),
        }
    }
}

/// The provisioned table's name and limits. The schema and composite
/// primary key are fixed by the backend for the table's lifetime.
#[derive(Debug, Clone)]
pub struct TableDescriptor {
    pub name: String,
    pub limits: TableLimits,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limits: TableLimits::default(),
        }
    }
}

/// Wall-clock budget for polling a table-state transition.
#[derive(Debug, Clone, Copy)]
pub struct PollBudget {
    pub max_wait: Duration,
    pub poll_interval: Duration,
}

impl PollBudget {
    /// Budget for initial provisioning, which can require real
    /// infrastructure allocation.
    pub const PROVISIONING: PollBudget = PollBudget {
        max_wait: Duration::from_secs(30),
        poll_interval: Duration::from_millis(500),
    };

    /// Budget for a post-creation limits change, typically near-instant.
    pub const LIMIT_CHANGE: PollBudget = PollBudget {
        max_wait: Duration::from_secs(2),
        poll_interval: Duration::from_millis(300),
    };
}

/// One row of the account-scoped listing projection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_keeps_omitted_fields() {
        let current = TableLimits::default();
        let changed = TableLimitChanges {
            read_units: Some(50),
            ..Default::default()
        }
        .overlay(current);

        assert_eq!(changed.read_units, 50);
        assert_eq!(changed.write_units, DEFAULT_WRITE_UNITS);
        assert_eq!(changed.storage_gb, DEFAULT_STORAGE_GB);
    }

    #[test]
    fn test_overlay_applies_all_fields() {
        let changed = TableLimitChanges {
            read_units: Some(1),
            write_units: Some(2),
            storage_gb: Some(3),
        }
        .overlay(TableLimits::default());

        assert_eq!(
            changed,
            TableLimits {
                read_units: 1,
                write_units: 2,
                storage_gb: 3
            }
        );
    }

    #[test]
    fn test_user_summary_serializes_with_wire_names() {
        let summary = UserSummary {
            user_name: Some("alice".to_string()),
            user_id: 7,
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"userName": "alice", "userID": 7})
        );
    }
}
