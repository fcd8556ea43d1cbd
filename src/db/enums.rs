use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Caller role. Stored and serialized with the human readable labels the
/// frontend displays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum UserRole {
    Admin,
    Manager,
    #[serde(rename = "Project Leader")]
    ProjectLeader,
    #[serde(rename = "Team Member")]
    TeamMember,
}

impl UserRole {
    /// Roles an Admin may hand out. `Admin` itself is never assignable.
    pub const ASSIGNABLE: [UserRole; 3] = [
        UserRole::Manager,
        UserRole::ProjectLeader,
        UserRole::TeamMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::ProjectLeader => "Project Leader",
            UserRole::TeamMember => "Team Member",
        }
    }

    pub fn is_assignable(&self) -> bool {
        Self::ASSIGNABLE.contains(self)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(UserRole::Admin),
            "Manager" => Ok(UserRole::Manager),
            "Project Leader" => Ok(UserRole::ProjectLeader),
            "Team Member" => Ok(UserRole::TeamMember),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl FromSql<Text, Pg> for UserRole {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl ToSql<Text, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Lifecycle label shared by the two status columns. Kept as two types so a
/// project status can never be written into a task row by mistake.
macro_rules! lifecycle_status {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            Serialize,
            Deserialize,
            AsExpression,
            FromSqlRow,
        )]
        #[diesel(sql_type = Text)]
        pub enum $name {
            #[default]
            #[serde(rename = "Not Started")]
            NotStarted,
            #[serde(rename = "In Progress")]
            InProgress,
            Completed,
        }

        impl $name {
            pub const ALL: [$name; 3] = [$name::NotStarted, $name::InProgress, $name::Completed];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::NotStarted => "Not Started",
                    $name::InProgress => "In Progress",
                    $name::Completed => "Completed",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "Not Started" => Ok($name::NotStarted),
                    "In Progress" => Ok($name::InProgress),
                    "Completed" => Ok($name::Completed),
                    other => Err(format!("Unknown status: {}", other)),
                }
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }
    };
}

lifecycle_status!(ProjectStatus);
lifecycle_status!(TaskStatus);
