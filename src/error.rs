use serde::Serialize;
use thiserror::Error;

/// A broken precondition of a pipeline operation or view.
///
/// Category mismatches (mutating a shared reference, borrowing into a temporary) never reach this
/// type: they do not compile. What remains are runtime preconditions the caller is expected to
/// uphold. They are reported through [`crate::contract`], which decides between panicking and
/// continuing with the documented fallback.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContractViolation {
    /// The operation needs at least one element.
    #[error("{operation}: operand is empty")]
    EmptyOperand { operation: &'static str },

    /// An element index past the end of the operand.
    #[error("{operation}: index {index} is out of range for length {len}")]
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    /// A view offset or count that does not fit the source.
    #[error("{operation}: offset {offset} exceeds length {len}")]
    OffsetOutOfRange {
        operation: &'static str,
        offset: usize,
        len: usize,
    },

    /// Sub-ranges can only be erased from their front edge.
    #[error("{operation}: erase must start at the front of the window, got offset {start}")]
    EraseNotAtFront { operation: &'static str, start: usize },

    /// Sub-ranges can only shrink.
    #[error("{operation}: cannot grow a sub-range from {len} to {requested} elements")]
    GrowSubRange {
        operation: &'static str,
        len: usize,
        requested: usize,
    },

    /// A filter cursor was advanced after reaching its end.
    #[error("{operation}: cursor advanced past the end")]
    AdvancePastEnd { operation: &'static str },

    /// A filter cursor was advanced or dereferenced before its first seek.
    #[error("{operation}: cursor is not positioned on a matching element")]
    CursorNotPositioned { operation: &'static str },

    /// `seek_first` was called on a cursor that already left its initial state.
    #[error("{operation}: cursor was already positioned")]
    CursorAlreadyPositioned { operation: &'static str },

    /// Lower bound above upper bound.
    #[error("{operation}: lower bound {low} is greater than upper bound {high}")]
    InvalidBounds {
        operation: &'static str,
        low: String,
        high: String,
    },

    /// Source interval of zero width, nothing to map from.
    #[error("{operation}: source interval [{low}, {high}] is empty")]
    DegenerateInterval {
        operation: &'static str,
        low: f64,
        high: f64,
    },
}

impl ContractViolation {
    /// Name of the operation or view method that detected the violation.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::EmptyOperand { operation }
            | Self::IndexOutOfRange { operation, .. }
            | Self::OffsetOutOfRange { operation, .. }
            | Self::EraseNotAtFront { operation, .. }
            | Self::GrowSubRange { operation, .. }
            | Self::AdvancePastEnd { operation }
            | Self::CursorNotPositioned { operation }
            | Self::CursorAlreadyPositioned { operation }
            | Self::InvalidBounds { operation, .. }
            | Self::DegenerateInterval { operation, .. } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContractViolation;

    #[test]
    fn messages_name_the_operation() {
        let v = ContractViolation::GrowSubRange {
            operation: "SubRange::resize",
            len: 5,
            requested: 7,
        };
        assert_eq!(v.operation(), "SubRange::resize");
        assert_eq!(
            v.to_string(),
            "SubRange::resize: cannot grow a sub-range from 5 to 7 elements"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let v = ContractViolation::EraseNotAtFront {
            operation: "SubRange::erase",
            start: 2,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "erase_not_at_front");
        assert_eq!(json["operation"], "SubRange::erase");
        assert_eq!(json["start"], 2);
    }
}
