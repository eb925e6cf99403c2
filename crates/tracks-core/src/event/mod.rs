//! Event model: ids, user types, scalar properties, the immutable `Event`,
//! and its flat persisted layout `EventRecord`.

pub mod id;
pub mod model;
pub mod properties;
pub mod record;
pub mod user_type;

pub use id::EventId;
pub use model::Event;
pub use properties::{Properties, PropertyValue};
pub use record::EventRecord;
pub use user_type::UserType;
