pub mod api;
pub mod error;
pub mod form;
pub mod model;
pub mod mutate;
pub mod notify;
pub mod remote;
pub mod shell;
pub mod store;
pub mod transcode;
pub mod tui;
pub mod tui_shell;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
