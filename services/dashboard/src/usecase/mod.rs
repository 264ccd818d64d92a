pub mod activate;
pub mod cookie_set;
pub mod history;
pub mod visitor;
