use crate::core::error::{Error, Result};
use serde::{Serialize, Deserialize};

/// Stored record frame: [flag:1][crc32:4 LE][payload]
const HEADER_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionType {
    None,
    Lz4,      // Fast compression (~500 MB/s), ratio 2-3x
}

impl CompressionType {
    fn flag(self) -> u8 {
        match self {
            CompressionType::None => 0,
            CompressionType::Lz4 => 1,
        }
    }

    fn from_flag(flag: u8) -> Result<Self> {
        match flag {
            0 => Ok(CompressionType::None),
            1 => Ok(CompressionType::Lz4),
            other => Err(Error::codec(format!("unknown compression flag {}", other))),
        }
    }
}

/// Frame an encoded record for storage, compressing the payload if asked to.
/// The checksum covers the payload as stored.
pub fn seal(data: &[u8], compression: CompressionType) -> Vec<u8> {
    let payload = match compression {
        CompressionType::None => None,
        CompressionType::Lz4 => Some(lz4_flex::compress_prepend_size(data)),
    };
    let payload = payload.as_deref().unwrap_or(data);

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.push(compression.flag());
    out.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Verify and unwrap a stored frame into `out`, a caller-owned buffer.
/// `max_len` bounds the decompressed size read from the LZ4 size prefix.
pub fn open_into(frame: &[u8], out: &mut Vec<u8>, max_len: u64) -> Result<()> {
    if frame.len() < HEADER_LEN {
        return Err(Error::codec(format!(
            "record frame too short: {} bytes",
            frame.len()
        )));
    }
    let compression = CompressionType::from_flag(frame[0])?;
    let expected = u32::from_le_bytes([frame[1], frame[2], frame[3], frame[4]]);
    let payload = &frame[HEADER_LEN..];

    let actual = crc32fast::hash(payload);
    if actual != expected {
        return Err(Error::codec(format!(
            "record checksum mismatch: stored {:08x}, computed {:08x}",
            expected, actual
        )));
    }

    out.clear();
    match compression {
        CompressionType::None => out.extend_from_slice(payload),
        CompressionType::Lz4 => {
            if payload.len() < 4 {
                return Err(Error::codec("LZ4 payload missing size prefix".to_string()));
            }
            let size = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
            if size as u64 > max_len {
                return Err(Error::codec(format!(
                    "decompressed record of {} bytes exceeds limit {}",
                    size, max_len
                )));
            }
            out.resize(size as usize, 0);
            let written = lz4_flex::block::decompress_into(&payload[4..], out)?;
            out.truncate(written);
        }
    }
    Ok(())
}
