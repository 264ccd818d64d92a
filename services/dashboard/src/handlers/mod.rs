pub mod activate;
pub mod cookies;
pub mod health;
pub mod history;
pub mod session;
