pub mod config;
pub mod contract;
pub mod controller;
pub mod debounce;
pub mod logging;
pub mod model;
pub mod result_store;
pub mod runtime;
pub mod search;
pub mod settings;
pub mod shortcut;
pub mod tab_visibility;
pub mod transport;
