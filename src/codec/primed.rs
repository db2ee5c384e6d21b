use std::marker::PhantomData;
use bincode::Options;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::compression::compress::{self, CompressionType};
use crate::core::error::{Error, Result};

fn options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new().with_limit(limit)
}

/// Codec settings checked once against a sample record.
///
/// Priming encodes and decodes the sample, then re-encodes the decoded value
/// and requires identical bytes. A record type whose serde impls do not
/// round-trip under bincode is rejected here instead of on first store.
/// The sample's encoded size seeds the scratch buffers of every encoder and
/// decoder spawned afterwards.
pub struct PrimedCodec<R> {
    limit: u64,
    compression: CompressionType,
    size_hint: usize,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for PrimedCodec<R> {
    fn clone(&self) -> Self {
        PrimedCodec {
            limit: self.limit,
            compression: self.compression,
            size_hint: self.size_hint,
            _record: PhantomData,
        }
    }
}

impl<R: Serialize + DeserializeOwned> PrimedCodec<R> {
    pub fn prime(sample: &R, limit: u64, compression: CompressionType) -> Result<Self> {
        let mut first = Vec::new();
        options(limit).serialize_into(&mut first, sample)?;

        let decoded: R = options(limit).deserialize(&first)?;

        let mut second = Vec::with_capacity(first.len());
        options(limit).serialize_into(&mut second, &decoded)?;

        if first != second {
            return Err(Error::codec(format!(
                "codec priming failed: sample re-encoded to {} bytes, expected {}",
                second.len(),
                first.len()
            )));
        }

        Ok(PrimedCodec {
            limit,
            compression,
            size_hint: first.len().max(256),
            _record: PhantomData,
        })
    }

    pub fn encoder(&self) -> RecordEncoder<R> {
        RecordEncoder {
            limit: self.limit,
            compression: self.compression,
            scratch: Vec::with_capacity(self.size_hint),
            _record: PhantomData,
        }
    }

    pub fn decoder(&self) -> RecordDecoder<R> {
        RecordDecoder {
            limit: self.limit,
            scratch: Vec::with_capacity(self.size_hint),
            _record: PhantomData,
        }
    }
}

/// Reusable encoder. Not shareable; check one out per encode.
pub struct RecordEncoder<R> {
    limit: u64,
    compression: CompressionType,
    scratch: Vec<u8>,
    _record: PhantomData<fn(&R)>,
}

impl<R: Serialize> RecordEncoder<R> {
    pub fn encode(&mut self, record: &R) -> Result<Vec<u8>> {
        self.scratch.clear();
        options(self.limit).serialize_into(&mut self.scratch, record)?;
        Ok(compress::seal(&self.scratch, self.compression))
    }
}

/// Reusable decoder. Not shareable; check one out per decode.
pub struct RecordDecoder<R> {
    limit: u64,
    scratch: Vec<u8>,
    _record: PhantomData<fn() -> R>,
}

impl<R: DeserializeOwned> RecordDecoder<R> {
    pub fn decode(&mut self, bytes: &[u8]) -> Result<R> {
        compress::open_into(bytes, &mut self.scratch, self.limit)?;
        Ok(options(self.limit).deserialize(&self.scratch)?)
    }
}
