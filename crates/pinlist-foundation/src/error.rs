use std::fmt;

use crate::list::MethodStatus;

/// Failure of a list-control method or a prop update.
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// An argument is outside its valid range.
    InvalidArgument { reason: String },
    /// The container was destroyed or its engine is gone.
    Destroyed,
    /// A pending smooth scroll was cut short before it reached its target.
    ScrollInterrupted {
        status: MethodStatus,
        reason: &'static str,
    },
    /// A prop value has the wrong type or shape.
    InvalidProp { name: String, reason: String },
    /// Auto-scroll could not start.
    AutoScroll { reason: String },
}

impl ListError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        ListError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn invalid_prop(name: &str, reason: impl Into<String>) -> Self {
        ListError::InvalidProp {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }

    /// Result code reported to the caller of a list-control method.
    pub fn status(&self) -> MethodStatus {
        match self {
            ListError::InvalidArgument { .. } | ListError::InvalidProp { .. } => {
                MethodStatus::ParamInvalid
            }
            ListError::Destroyed => MethodStatus::InvalidStateError,
            ListError::ScrollInterrupted { status, .. } => *status,
            ListError::AutoScroll { .. } => MethodStatus::Unknown,
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            ListError::Destroyed => f.write_str("List has been destroyed"),
            ListError::ScrollInterrupted { reason, .. } => f.write_str(reason),
            ListError::InvalidProp { name, reason } => {
                write!(f, "invalid value for prop `{name}`: {reason}")
            }
            ListError::AutoScroll { reason } => write!(f, "auto scroll failed: {reason}"),
        }
    }
}

impl std::error::Error for ListError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ListError::Destroyed.status().code(), 5);
        assert_eq!(ListError::invalid_argument("x").status().code(), 4);
        let interrupted = ListError::ScrollInterrupted {
            status: MethodStatus::Unknown,
            reason: "stopped",
        };
        assert_eq!(interrupted.status().code(), 1);
        assert_eq!(interrupted.to_string(), "stopped");
    }
}
