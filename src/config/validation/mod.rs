//! Configuration validation
//!
//! Each configuration section implements [`Validate`]; required settings are
//! checked together by [`crate::config::Config::validate`].

mod trait_def;
mod validators;


pub use trait_def::Validate;
