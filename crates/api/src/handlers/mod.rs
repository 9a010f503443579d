pub mod editor;
pub mod events;
pub mod fields;
pub mod forms;
pub mod notifications;
pub mod terms;
pub mod tickets;
