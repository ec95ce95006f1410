//! Template domain types and render coordination.
//!
//! # Module Organization
//!
//! - [`error`]: Error type shared by every stage
//! - [`config`]: Template configuration and validation
//! - [`key`]: Key records and path derivation
//! - [`filter`]: Prefix stripping and key filtering stage
//! - [`output`]: Output sink selection
//! - [`renderer`]: Pipeline coordinator

mod config;
mod error;
mod filter;
mod key;
mod output;
mod renderer;

pub use config::{Config, Format, Template};
pub use error::Error;
pub use filter::KeyFilter;
pub use key::{split_path, strip_prefix, Key, KeyRecord, RawKey};
pub use output::Output;
pub use renderer::Renderer;
