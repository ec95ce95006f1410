//! Generate confd templates from the keys of a key/value backend.
//!
//! Keys streamed by a [`backend::KeySource`] are filtered and split into
//! paths by the [`template`] pipeline, then folded into a nested document
//! by an [`engine::Engine`] whose leaves are `getv` placeholders.

pub mod backend;
pub mod cli;
pub mod engine;
pub mod template;
