use roaring::RoaringBitmap;
use crate::core::error::{Error, Result};
use crate::core::types::RecordId;

/// Posting list for a term: the ids of every record indexed under it.
/// Backed by a roaring bitmap, so ids are kept sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingList {
    bitmap: RoaringBitmap,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            bitmap: RoaringBitmap::new(),
        }
    }

    /// Load a posting list from its stored form. `None` means the term has
    /// never been indexed and yields an empty list.
    pub fn load(bytes: Option<&[u8]>) -> Result<Self> {
        match bytes {
            None => Ok(PostingList::new()),
            Some(bytes) => {
                let bitmap = RoaringBitmap::deserialize_from(bytes)
                    .map_err(|e| Error::codec(format!("corrupt posting list: {}", e)))?;
                Ok(PostingList { bitmap })
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.bitmap.serialized_size());
        self.bitmap
            .serialize_into(&mut out)
            .map_err(|e| Error::codec(format!("posting list encode failed: {}", e)))?;
        Ok(out)
    }

    /// Returns true if the id was not already present.
    pub fn add(&mut self, id: RecordId) -> bool {
        self.bitmap.insert(id.0)
    }

    /// Returns true if the id was present.
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.bitmap.remove(id.0)
    }

    pub fn len(&self) -> u64 {
        self.bitmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// First `limit` ids in ascending order.
    pub fn page(&self, limit: usize) -> Vec<RecordId> {
        self.bitmap.iter().take(limit).map(RecordId).collect()
    }
}
