//! Document engines turning a key stream into a template.

pub mod yaml;

use crate::template::{Error, Key, Output};

/// A template formatting engine.
pub trait Engine {
    /// Consume `keys` and write the resulting document to `output`.
    ///
    /// Implementations stop at the first error item and must not open
    /// `output` unless the whole stream was consumed successfully.
    fn render(
        &self,
        keys: &mut dyn Iterator<Item = Result<Key, Error>>,
        output: &Output,
    ) -> Result<(), Error>;
}
