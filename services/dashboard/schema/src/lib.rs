//! sea-orm entities for the dashboard service.

pub mod activation_attempts;
pub mod cookie_sets;
pub mod visitors;
