/// Trait for mapping domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);

    /// Request field the error is about, if any.
    fn error_field(&self) -> Option<&'static str> {
        None
    }
}

// ── ItemError ──────────────────────────────────────────────────────────────────
impl ToStructuredError for crate::item::ItemError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::item::ItemError;
        match self {
            ItemError::ValidationError { .. } => ("VALIDATION_ERROR", None),
            ItemError::NotFound(_) => ("ITEM_NOT_FOUND", None),
            ItemError::InvalidTransition { .. } => (
                "INVALID_TRANSITION",
                Some("Only pending items can be approved or rejected, and only approved items resolved"),
            ),
            ItemError::Persistence(e) => e.error_code_and_tip(),
        }
    }

    fn error_field(&self) -> Option<&'static str> {
        self.field()
    }
}

// ── MessageError ───────────────────────────────────────────────────────────────
impl ToStructuredError for crate::message::MessageError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::message::MessageError;
        match self {
            MessageError::ValidationError { .. } => ("VALIDATION_ERROR", None),
            MessageError::ItemNotFound(_) => ("ITEM_NOT_FOUND", None),
            MessageError::Store(e) => e.error_code_and_tip(),
            MessageError::Persistence(e) => e.error_code_and_tip(),
        }
    }

    fn error_field(&self) -> Option<&'static str> {
        self.field()
    }
}

// ── SnapshotError ──────────────────────────────────────────────────────────────
impl ToStructuredError for crate::persistence::SnapshotError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::persistence::SnapshotError;
        match self {
            SnapshotError::Io { .. } => (
                "PERSISTENCE_ERROR",
                Some("Check that the daemon's data directory is writable"),
            ),
            SnapshotError::Json { .. } => ("PERSISTENCE_ERROR", None),
            SnapshotError::UnsupportedVersion { .. } => (
                "PERSISTENCE_ERROR",
                Some("The snapshot was written by a newer daemon; upgrade lostfound-daemon"),
            ),
        }
    }
}
