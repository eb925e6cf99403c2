//! Context providers: ambient attributes merged into every event at creation.

pub mod device;
pub mod static_context;

pub use device::DeviceInformation;
pub use static_context::StaticContext;

use crate::event::Properties;

/// Supplies ambient device/app/session attributes to the event factory.
///
/// Implementations must be cheap, synchronous, and free of observable side
/// effects: the factory calls `current_attributes` once per event.
pub trait ContextProvider: Send + Sync {
    /// Attributes to merge into the next event.
    fn current_attributes(&self) -> Properties;

    /// Client descriptor stamped on events the factory synthesizes itself
    /// (alias events).
    fn user_agent(&self) -> String {
        String::new()
    }
}
