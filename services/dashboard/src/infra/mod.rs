pub mod db;
pub mod qr;
pub mod relay;
