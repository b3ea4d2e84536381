// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;

pub use logging::{format_error, format_info, format_step, format_success, format_warning};
