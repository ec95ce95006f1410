//! Filter stage between a key source and an engine.

use super::config::Template;
use super::error::Error;
use super::key::{split_path, strip_prefix, Key, KeyRecord};

/// Iterator adapter that strips the template prefix from each key, drops
/// keys rejected by the filter expression and attaches the key path.
///
/// The first error record ends the stream: it is yielded once and nothing
/// after it is read.
pub struct KeyFilter<'a, I> {
    keys: I,
    template: &'a Template,
    done: bool,
}

impl<'a, I> KeyFilter<'a, I>
where
    I: Iterator<Item = KeyRecord>,
{
    pub fn new(keys: I, template: &'a Template) -> Self {
        Self {
            keys,
            template,
            done: false,
        }
    }

    /// Give the wrapped stream back, e.g. to close it.
    pub fn into_inner(self) -> I {
        self.keys
    }

    fn transform(&self, name: String, value: String) -> Option<Result<Key, Error>> {
        let relative = strip_prefix(&name, &self.template.prefix);
        if let Some(filter) = &self.template.filter {
            if !filter.is_match(&relative) {
                log::debug!("filtering key {}", relative);
                return None;
            }
        }
        let key = split_path(&name, &relative, &self.template.delimiter).map(|path| Key {
            name,
            relative,
            value,
            path,
        });
        Some(key)
    }
}

impl<I> Iterator for KeyFilter<'_, I>
where
    I: Iterator<Item = KeyRecord>,
{
    type Item = Result<Key, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let raw = match self.keys.next()? {
                Ok(raw) => raw,
                Err(e) => {
                    log::error!("key error detected: {}", e);
                    self.done = true;
                    return Some(Err(e));
                }
            };
            if let Some(key) = self.transform(raw.name, raw.value) {
                if key.is_err() {
                    self.done = true;
                }
                return Some(key);
            }
        }
        None
    }
}
