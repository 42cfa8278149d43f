pub mod check_email;
pub mod config;
pub mod consent;
pub mod search;
pub mod simulate;
