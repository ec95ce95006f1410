//! Key sources feeding the render pipeline.
//!
//! A [`KeySource`] produces a [`KeyStream`]: a bounded, ordered channel of
//! [`KeyRecord`]s filled by a background producer thread. The producer
//! blocks while the channel is full, and stops early once the consuming
//! side drops or closes the stream.
//!
//! # Module Organization
//!
//! - [`env`]: environment variables mapped to key paths
//! - [`file`]: YAML/JSON documents flattened to key paths

pub mod env;
pub mod file;

use crate::template::{Error, KeyRecord, RawKey};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Capacity of the channel between a producer and the pipeline.
pub const STREAM_CAPACITY: usize = 500;

/// Provides access to a key/value configuration store.
pub trait KeySource {
    /// Start streaming every key under `query.prefix`.
    fn keys(&self, query: &Query) -> KeyStream;
}

/// Scan parameters handed to a key source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub prefix: String,
    pub recursive: bool,
    /// Ask for decrypted values of encrypted keys. Sources without
    /// encryption ignore it.
    pub with_decryption: bool,
}

impl Query {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            recursive: true,
            with_decryption: true,
        }
    }

    /// Whether a key name falls inside this scan.
    ///
    /// Without `recursive`, only direct children of the prefix match, using
    /// `/` as the hierarchy separator the way parameter stores do.
    pub fn admits(&self, name: &str) -> bool {
        let Some(rest) = name.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        self.recursive || !rest.trim_start_matches('/').contains('/')
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Shared flag telling a producer to stop.
#[derive(Debug, Clone, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// Producer side
// =============================================================================

/// Handle used by a producer thread to push keys into its stream.
pub struct Emitter {
    sender: Sender<KeyRecord>,
    cancel: Cancel,
    emitted: usize,
}

impl Emitter {
    /// Send one key, blocking while the channel is full.
    ///
    /// Returns `false` when the consumer is gone or cancelled the stream;
    /// the producer should stop scanning then.
    pub fn emit(&mut self, key: RawKey) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        if self.sender.send(Ok(key)).is_err() {
            return false;
        }
        self.emitted += 1;
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Run `produce` on a background thread and return the stream it feeds.
///
/// An error returned by `produce` becomes the terminal record of the
/// stream. The stream closes when the producer returns.
pub fn spawn<F>(name: &str, produce: F) -> KeyStream
where
    F: FnOnce(&mut Emitter) -> Result<(), Error> + Send + 'static,
{
    spawn_with_capacity(name, STREAM_CAPACITY, produce)
}

pub fn spawn_with_capacity<F>(name: &str, capacity: usize, produce: F) -> KeyStream
where
    F: FnOnce(&mut Emitter) -> Result<(), Error> + Send + 'static,
{
    let (sender, receiver) = bounded(capacity);
    let cancel = Cancel::default();
    let mut emitter = Emitter {
        sender,
        cancel: cancel.clone(),
        emitted: 0,
    };

    let source = name.to_string();
    let handle = thread::Builder::new()
        .name(format!("keys-{}", name))
        .spawn(move || {
            let result = produce(&mut emitter);
            match result {
                Ok(()) if emitter.is_cancelled() => {
                    log::debug!("{}: scan cancelled after {} keys", source, emitter.emitted);
                }
                Ok(()) => {
                    log::debug!("{}: scan complete, {} keys", source, emitter.emitted);
                }
                Err(e) => {
                    log::error!("{}: {}", source, e);
                    // Consumer may already be gone; nothing left to tell.
                    let _ = emitter.sender.send(Err(e));
                }
            }
        });

    match handle {
        Ok(handle) => KeyStream {
            receiver: Some(receiver),
            cancel,
            handle: Some(handle),
        },
        Err(e) => KeyStream::failed(Error::Backend(format!(
            "unable to start {} producer: {}",
            name, e
        ))),
    }
}

// =============================================================================
// Consumer side
// =============================================================================

/// Ordered stream of key records from a single producer.
pub struct KeyStream {
    receiver: Option<Receiver<KeyRecord>>,
    cancel: Cancel,
    handle: Option<thread::JoinHandle<()>>,
}

impl KeyStream {
    /// Stream holding a single error record.
    pub fn failed(e: Error) -> Self {
        let (sender, receiver) = bounded(1);
        let _ = sender.send(Err(e));
        KeyStream {
            receiver: Some(receiver),
            cancel: Cancel::default(),
            handle: None,
        }
    }

    /// Stop the producer and wait for its thread to exit.
    pub fn close(mut self) {
        self.cancel.cancel();
        // Dropping the receiver unblocks a producer waiting on a full channel.
        self.receiver.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("key producer thread panicked");
            }
        }
    }
}

impl Iterator for KeyStream {
    type Item = KeyRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for KeyStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// =============================================================================
// In-memory source
// =============================================================================
