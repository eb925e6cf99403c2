pub mod event_crud;
pub mod maintenance;
