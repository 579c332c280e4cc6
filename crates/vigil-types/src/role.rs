//! The three application roles and their dashboard routing.

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// The role a resolved session holds.
///
/// Stored in the profile record as a lowercase string; anything outside
/// this set is a profile-integrity error and must never resolve a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Caretaker,
    Medical,
}

impl Role {
    /// All recognized roles, in display order.
    pub const ALL: [Role; 3] = [Role::Patient, Role::Caretaker, Role::Medical];

    /// The role's dashboard route, e.g. `/dashboard/patient`.
    pub fn dashboard_path(&self) -> String {
        format!("/dashboard/{self}")
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Caretaker => write!(f, "caretaker"),
            Role::Medical => write!(f, "medical"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "caretaker" => Ok(Role::Caretaker),
            "medical" => Ok(Role::Medical),
            _ => Err(VigilError::Profile(format!(
                "unrecognized role: {s:?} (expected patient, caretaker, or medical)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("admin".parse::<Role>().is_err());
        assert!("Patient".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn dashboard_paths() {
        assert_eq!(Role::Patient.dashboard_path(), "/dashboard/patient");
        assert_eq!(Role::Medical.dashboard_path(), "/dashboard/medical");
    }
}
