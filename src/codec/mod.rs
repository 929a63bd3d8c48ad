//! Resource codecs
//!
//! A codec turns one raw record from a listing page into one typed
//! resource handle. Codecs are plain values: they are passed explicitly
//! wherever a typed page, sequence or collection is built, and cloned
//! cheaply across every page of a collection.

use crate::error::{Error, Result};
use crate::pagination::RawRecord;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

type DecodeFn<T> = dyn Fn(&RawRecord) -> Result<T> + Send + Sync;

/// Pure mapping from a raw record to a typed resource
pub struct Codec<T> {
    decode: Arc<DecodeFn<T>>,
}

impl<T> Codec<T> {
    /// Create a codec from a decoding function
    pub fn new<F>(decode: F) -> Self
    where
        F: Fn(&RawRecord) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            decode: Arc::new(decode),
        }
    }

    /// Decode a single record
    pub fn decode(&self, record: &RawRecord) -> Result<T> {
        (self.decode)(record)
    }

    /// Post-process every decoded resource
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Codec<U>
    where
        T: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let inner = self.decode;
        Codec::new(move |record| inner(record).map(&f))
    }
}

impl<T: DeserializeOwned> Codec<T> {
    /// Codec that deserializes each record with serde
    pub fn deserialize() -> Self {
        Self::new(|record| {
            T::deserialize(record).map_err(|e| {
                Error::decode(format!(
                    "{}: {e}",
                    std::any::type_name::<T>()
                        .rsplit("::")
                        .next()
                        .unwrap_or("resource")
                ))
            })
        })
    }
}

impl Codec<RawRecord> {
    /// Identity codec, hands out the raw records untouched
    pub fn raw() -> Self {
        Self::new(|record| Ok(record.clone()))
    }
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
