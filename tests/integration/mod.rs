//! Integration tests for changegen

mod check_command;
mod config_integration;
mod init_command;
mod release_lifecycle;
mod release_notes;
pub mod test_utils;
