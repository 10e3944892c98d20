pub mod common;
pub mod config;
pub mod event;
pub mod musician;
pub mod scale;
pub mod slot;
pub mod suggest;
