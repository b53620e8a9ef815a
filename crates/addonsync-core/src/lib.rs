pub mod config;
pub mod logging;

pub mod api;
pub mod catalog;
pub mod fetch;
pub mod http;
pub mod patch;
pub mod sync;
pub mod update_list;
