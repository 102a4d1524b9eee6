//! Persistence of a [`ChebychevBasis`].
//!
//! Only the defining triple `(min, max, n)` is stored. Nodes and the basis
//! matrix are rebuilt with [`ChebychevBasis::new`] on load, so a stored basis
//! can never disagree with its own nodes.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::basis::chebychev::ChebychevBasis;
use crate::errors::ChebError;

/// Byte layout of a stored basis, optionally LZ4 compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializationFormat {
    /// Human readable, e.g. for configuration files
    Json,
    JsonLz4,
    Bitcode,
    #[default]
    BitcodeLz4,
}

impl SerializationFormat {
    pub fn is_compressed(&self) -> bool {
        matches!(self, SerializationFormat::JsonLz4 | SerializationFormat::BitcodeLz4)
    }

    fn encode<T: Serialize>(&self, data: &T) -> Result<Vec<u8>, ChebError> {
        let bytes = match self {
            SerializationFormat::Json | SerializationFormat::JsonLz4 => {
                serde_json::to_vec(data).map_err(|_| ChebError::SerializationFailed)?
            }
            SerializationFormat::Bitcode | SerializationFormat::BitcodeLz4 => {
                bitcode::serialize(data).map_err(|_| ChebError::SerializationFailed)?
            }
        };
        Ok(self.compress(bytes))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ChebError> {
        let decompressed;
        let data = if self.is_compressed() {
            decompressed = lz4_flex::decompress_size_prepended(data)
                .map_err(|_| ChebError::LZ4DecompressionFailed)?;
            &decompressed[..]
        } else {
            data
        };
        match self {
            SerializationFormat::Json | SerializationFormat::JsonLz4 => {
                serde_json::from_slice(data).map_err(|_| ChebError::DeserializationFailed)
            }
            SerializationFormat::Bitcode | SerializationFormat::BitcodeLz4 => {
                bitcode::deserialize(data).map_err(|_| ChebError::DeserializationFailed)
            }
        }
    }

    fn compress(&self, bytes: Vec<u8>) -> Vec<u8> {
        if self.is_compressed() {
            lz4_flex::compress_prepend_size(&bytes)
        } else {
            bytes
        }
    }
}

/// Stored form of a [`ChebychevBasis`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredBasis {
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl From<ChebychevBasis> for StoredBasis {
    fn from(basis: ChebychevBasis) -> Self {
        StoredBasis { min: basis.min(), max: basis.max(), n: basis.len() }
    }
}

impl TryFrom<StoredBasis> for ChebychevBasis {
    type Error = ChebError;

    // `new` assumes n >= 2 and min < max; stored bytes need not satisfy either.
    fn try_from(stored: StoredBasis) -> Result<Self, Self::Error> {
        if stored.n < 2 || !stored.min.is_finite() || !stored.max.is_finite() || stored.min >= stored.max {
            tracing::debug!(?stored, "rejecting stored basis");
            return Err(ChebError::DeserializationFailed);
        }
        Ok(ChebychevBasis::new(stored.min, stored.max, stored.n))
    }
}

pub fn write_basis(basis: &ChebychevBasis, format: SerializationFormat) -> Result<Vec<u8>, ChebError> {
    format.encode(basis)
}

pub fn read_basis(data: &[u8], format: SerializationFormat) -> Result<ChebychevBasis, ChebError> {
    format.decode(data)
}
