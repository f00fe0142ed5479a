pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;
