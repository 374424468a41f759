pub mod compare;
pub mod config;
pub mod detect;
pub mod info;
