pub mod event_storage;

pub use event_storage::{DrainOutcome, IEventStorage};
