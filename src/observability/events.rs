//! Observable events of the lightsaber service
//!
//! Events are explicit and typed. Each log line for a lifecycle step or a
//! record mutation carries one of these names in its `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Document store opened
    StoreOpened,
    /// Listener bound, ready for requests
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Record mutations
    RecordCreated,
    RecordUpdated,
    RecordReplaced,
    RecordDeleted,

    // Failures
    /// Client request rejected (4xx)
    RequestRejected,
    /// Document store failed (5xx)
    StoreFailure,
    /// Panic or other failure with no mapped kind (5xx)
    UnhandledError,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordReplaced => "RECORD_REPLACED",
            Event::RecordDeleted => "RECORD_DELETED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::StoreFailure => "STORE_FAILURE",
            Event::UnhandledError => "UNHANDLED_ERROR",
        }
    }

    /// True for events logged at ERROR
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::StoreFailure | Event::UnhandledError)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake_case() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::StoreOpened,
            Event::Serving,
            Event::ShutdownComplete,
            Event::RecordCreated,
            Event::RecordUpdated,
            Event::RecordReplaced,
            Event::RecordDeleted,
            Event::RequestRejected,
            Event::StoreFailure,
            Event::UnhandledError,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", name);
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn test_server_side_events_are_failures() {
        assert!(Event::StoreFailure.is_failure());
        assert!(Event::UnhandledError.is_failure());
        assert!(!Event::RequestRejected.is_failure());
        assert!(!Event::RecordDeleted.is_failure());
    }
}
