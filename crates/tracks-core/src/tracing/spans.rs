//! Span definitions per store operation.

/// Span for a single append.
#[macro_export]
macro_rules! append_span {
    ($event_id:expr, $name:expr) => {
        ::tracing::debug_span!("tracks.append", event_id = %$event_id, name = %$name)
    };
}

/// Span for a removal by id.
#[macro_export]
macro_rules! remove_span {
    ($requested:expr) => {
        ::tracing::debug_span!("tracks.remove", requested = $requested)
    };
}

/// Span for store recovery.
#[macro_export]
macro_rules! recovery_span {
    ($reason:expr) => {
        ::tracing::info_span!("tracks.recovery", reason = %$reason)
    };
}
