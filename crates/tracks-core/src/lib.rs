//! # tracks-core
//!
//! Foundation crate for the Tracks event buffer.
//! Defines the event model, the event factory, context providers, the storage
//! trait, errors, config, constants, and tracing setup.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod event;
pub mod factory;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::TracksConfig;
pub use context::{ContextProvider, DeviceInformation, StaticContext};
pub use errors::{TracksError, TracksResult};
pub use event::{Event, EventId, EventRecord, Properties, PropertyValue, UserType};
pub use factory::EventFactory;
pub use traits::{DrainOutcome, IEventStorage};
