use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shared surface of the closed label enums, used by the status partition
/// counts in `metrics`.
pub trait Labelled: Clone + PartialEq + 'static {
    fn known() -> &'static [Self];
    fn key(&self) -> &str;
    fn display_label(&self) -> &str;
}

macro_rules! closed_label_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A stored label outside the known set; kept verbatim.
            Unknown(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn label(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl Labelled for $name {
            fn known() -> &'static [Self] {
                $name::KNOWN
            }

            fn key(&self) -> &str {
                $name::as_str(self)
            }

            fn display_label(&self) -> &str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = normalize_label(value);
                $name::KNOWN
                    .iter()
                    .find(|known| known.as_str() == normalized)
                    .cloned()
                    .ok_or_else(|| ParseLabelError {
                        field: $field,
                        value: value.to_string(),
                        expected: $name::KNOWN.iter().map(|known| known.as_str()).collect(),
                    })
            }
        }

        /// Stored labels match the wire strings exactly; anything else is
        /// kept verbatim as `Unknown`.
        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::KNOWN
                    .iter()
                    .find(|known| known.as_str() == value)
                    .cloned()
                    .unwrap_or_else(|| $name::Unknown(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }
    };
}

closed_label_enum! {
    Role ("role") {
        Admin => "admin", "Admin";
        Supervisor => "supervisor", "Supervisor";
        Worker => "worker", "Worker";
    }
}

closed_label_enum! {
    ProjectStatus ("project status") {
        PendingApproval => "pending-approval", "Pending Approval";
        InProgress => "in-progress", "In Progress";
        Completed => "completed", "Completed";
    }
}

closed_label_enum! {
    TaskStatus ("task status") {
        NotStarted => "not-started", "Not Started";
        InProgress => "in-progress", "In Progress";
        Completed => "completed", "Completed";
    }
}

closed_label_enum! {
    FeedbackStatus ("feedback status") {
        Pending => "pending", "Pending";
        InProgress => "in-progress", "In Progress";
        Resolved => "resolved", "Resolved";
        Rejected => "rejected", "Rejected";
    }
}

impl TaskStatus {
    /// Ordering used by the supervisor's recent-task list: active work first.
    pub fn priority(&self) -> u8 {
        match self {
            TaskStatus::InProgress => 0,
            TaskStatus::NotStarted => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Unknown(_) => 3,
        }
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace(['_', ' '], "-")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    field: &'static str,
    value: String,
    expected: Vec<&'static str>,
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}': expected one of {}",
            self.field,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl Error for ParseLabelError {}
