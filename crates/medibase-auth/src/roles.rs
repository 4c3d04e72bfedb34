//! The closed role set and the named gates built from it.
//!
//! A [`Role`] is parsed once, when a user record enters the system. Requests
//! never carry raw role strings past that point, so an unknown role can only
//! fail at construction time.
//!
//! A [`Gate`] is nothing more than a named [`RoleSet`]. Adding a role means
//! touching [`Role`] and whichever gate constants should admit it; the
//! authorization check itself lives in exactly one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Staff,
    /// Basic, patient-equivalent account.
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Staff, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Staff => "staff",
            Role::User => "user",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "staff" => Ok(Role::Staff),
            "user" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A set of roles, stored as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);

    pub const ADMIN_ONLY: RoleSet = RoleSet::of(&[Role::Admin]);
    pub const DOCTOR_OR_ADMIN: RoleSet = RoleSet::of(&[Role::Doctor, Role::Admin]);
    pub const STAFF_TIER: RoleSet = RoleSet::of(&[Role::Admin, Role::Staff, Role::Doctor]);
    pub const ADMIN_OR_STAFF: RoleSet = RoleSet::of(&[Role::Admin, Role::Staff]);

    pub const fn of(roles: &[Role]) -> RoleSet {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    #[must_use]
    pub const fn with(self, role: Role) -> RoleSet {
        RoleSet(self.0 | role.bit())
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, RoleSet::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Role::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A named, preset role set protecting a class of routes.
pub trait Gate: Send + Sync + 'static {
    const NAME: &'static str;
    const ROLES: RoleSet;
}

macro_rules! gate {
    ($(#[$meta:meta])* $name:ident, $label:literal, $roles:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Gate for $name {
            const NAME: &'static str = $label;
            const ROLES: RoleSet = $roles;
        }
    };
}

gate!(
    /// Administrators only.
    AdminOnly,
    "admin-only",
    RoleSet::ADMIN_ONLY
);
gate!(
    /// Doctors and administrators.
    DoctorOrAdmin,
    "doctor-or-admin",
    RoleSet::DOCTOR_OR_ADMIN
);
gate!(
    /// Everyone working in the hospital: administrators, staff and doctors.
    StaffTier,
    "staff-tier",
    RoleSet::STAFF_TIER
);
gate!(
    /// Front-desk writes: administrators and staff.
    AdminOrStaff,
    "admin-or-staff",
    RoleSet::ADMIN_OR_STAFF
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_from_string() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("doctor".parse::<Role>(), Ok(Role::Doctor));
        assert_eq!("staff".parse::<Role>(), Ok(Role::Staff));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(ParseRoleError("superuser".to_string()))
        );
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_names_match_as_str() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        assert!(serde_json::from_str::<Role>("\"nurse\"").is_err());
    }

    #[test]
    fn test_role_set_membership() {
        let set = RoleSet::of(&[Role::Admin, Role::Staff]);
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::Staff));
        assert!(!set.contains(Role::Doctor));
        assert!(!set.contains(Role::User));
        assert!(RoleSet::EMPTY.is_empty());
    }

    #[test]
    fn test_role_set_from_iterator_and_display() {
        let set: RoleSet = [Role::Doctor, Role::Admin, Role::Doctor].into_iter().collect();
        assert_eq!(set, RoleSet::DOCTOR_OR_ADMIN);
        assert_eq!(set.to_string(), "admin, doctor");
    }

    #[test]
    fn test_gate_role_sets() {
        assert_eq!(AdminOnly::ROLES.iter().collect::<Vec<_>>(), vec![Role::Admin]);
        assert_eq!(
            DoctorOrAdmin::ROLES.iter().collect::<Vec<_>>(),
            vec![Role::Admin, Role::Doctor]
        );
        assert_eq!(
            StaffTier::ROLES.iter().collect::<Vec<_>>(),
            vec![Role::Admin, Role::Doctor, Role::Staff]
        );
        assert!(!StaffTier::ROLES.contains(Role::User));
    }
}
