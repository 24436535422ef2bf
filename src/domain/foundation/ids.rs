//! Strongly-typed identifier value objects.
//!
//! Every entity the core touches gets its own UUID newtype so that an
//! employee id can never be passed where a process id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id! {
    /// Unique identifier for one elicitation interview.
    InterviewId
}

define_id! {
    /// Unique identifier for an employee in the directory.
    EmployeeId
}

define_id! {
    /// Unique identifier for a catalogued business process.
    ProcessId
}

define_id! {
    /// Unique identifier for an organization.
    OrgId
}

define_id! {
    /// Unique identifier for a role in the directory.
    RoleId
}

define_id! {
    /// Unique identifier for a persisted process reference.
    ///
    /// Also serves as the deterministic secondary sort key when two
    /// references share the same creation timestamp.
    ReferenceId
}
