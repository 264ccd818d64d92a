//! Domain types and pure parsing logic for tvlink.
//!
//! No framework dependencies: no axum, sea-orm or reqwest here. Services
//! import this from `usecase/` and `domain/`.

pub mod activation;
pub mod code;
pub mod cookie;
