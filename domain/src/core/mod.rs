//! Core helpers shared across all subdomains.
//!
//! - [`string::truncate`]: UTF-8 safe truncation for previews and logs

pub mod string;
