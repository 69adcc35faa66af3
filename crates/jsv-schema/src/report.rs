//! Delivery of a finished validation result to a downstream consumer.
//!
//! A [`ViolationSink`] receives the complete error list exactly once per
//! top-level validation, after the whole instance tree has been walked.

use crate::error::ValidationError;

/// Receiver for the outcome of one validation call.
pub trait ViolationSink {
    /// Called once with the full, ordered violation list (empty = valid).
    fn accept(&mut self, errors: &[ValidationError]);
}

impl ViolationSink for Vec<ValidationError> {
    fn accept(&mut self, errors: &[ValidationError]) {
        self.extend_from_slice(errors);
    }
}

/// Logs each violation through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    /// Label attached to every event, e.g. the document being checked.
    pub subject: String,
}

impl TracingSink {
    /// A sink whose events carry `subject`.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl ViolationSink for TracingSink {
    fn accept(&mut self, errors: &[ValidationError]) {
        if errors.is_empty() {
            tracing::debug!(subject = %self.subject, "document is valid");
            return;
        }
        for error in errors {
            tracing::warn!(
                subject = %self.subject,
                code = %error.code(),
                path = error.path(),
                "schema violation"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<ValidationError> = Vec::new();
        sink.accept(&[
            ValidationError::new(ErrorCode::Required, "a"),
            ValidationError::new(ErrorCode::MaxItems, "b"),
        ]);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].code(), ErrorCode::MaxItems);
    }

    #[test]
    fn tracing_sink_accepts_without_subscriber() {
        let mut sink = TracingSink::new("config.yaml");
        sink.accept(&[]);
        sink.accept(&[ValidationError::new(ErrorCode::Enum, "")]);
        assert_eq!(sink.subject, "config.yaml");
    }
}
