//! Employee domain types.

use serde::{Deserialize, Serialize};

/// Total annual leave days granted to a newly provisioned employee.
pub const DEFAULT_TOTAL_LEAVES: i32 = 50;

/// Employment status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and working.
    Active,
    /// Currently employed but on leave.
    OnLeave,
    /// No longer employed.
    Terminated,
    /// In a probationary period.
    Probation,
}

impl EmployeeStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Terminated => "terminated",
            Self::Probation => "probation",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            // Older records used a space-separated form.
            "on_leave" | "on leave" => Some(Self::OnLeave),
            "terminated" => Some(Self::Terminated),
            "probation" => Some(Self::Probation),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("active", EmployeeStatus::Active)]
    #[case("on_leave", EmployeeStatus::OnLeave)]
    #[case("on leave", EmployeeStatus::OnLeave)]
    #[case("TERMINATED", EmployeeStatus::Terminated)]
    #[case("probation", EmployeeStatus::Probation)]
    fn test_status_parse(#[case] input: &str, #[case] expected: EmployeeStatus) {
        assert_eq!(EmployeeStatus::parse(input), Some(expected));
    }

    #[test]
    fn test_status_parse_invalid() {
        assert_eq!(EmployeeStatus::parse("retired"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EmployeeStatus::Active,
            EmployeeStatus::OnLeave,
            EmployeeStatus::Terminated,
            EmployeeStatus::Probation,
        ] {
            assert_eq!(EmployeeStatus::parse(status.as_str()), Some(status));
        }
    }
}
