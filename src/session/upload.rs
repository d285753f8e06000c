//! Image upload collaborator and in-flight tracking.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Public url of the stored image
    pub url: String,
}

/// Stores image bytes and returns a url.
pub trait ImageUploader {
    /// Upload one image.
    fn upload(&self, bytes: &[u8]) -> Result<UploadedImage>;
}

/// Marker for one in-flight upload targeting one image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket {
    id: u64,
    block: usize,
}

impl UploadTicket {
    /// Index of the image block when the upload started.
    pub fn block(&self) -> usize {
        self.block
    }
}

/// Pending uploads keyed by block index.
#[derive(Debug, Default)]
pub(crate) struct UploadTracker {
    pending: HashMap<usize, u64>,
    next_id: u64,
}

impl UploadTracker {
    pub(crate) fn is_pending(&self, block: usize) -> bool {
        self.pending.contains_key(&block)
    }

    pub(crate) fn issue(&mut self, block: usize) -> UploadTicket {
        self.next_id += 1;
        self.pending.insert(block, self.next_id);
        UploadTicket {
            id: self.next_id,
            block,
        }
    }

    /// Retire a ticket, returning the current index of its block.
    ///
    /// Returns `None` for stale or unknown tickets, including tickets whose
    /// block was removed.
    pub(crate) fn retire(&mut self, ticket: &UploadTicket) -> Option<usize> {
        let block = self
            .pending
            .iter()
            .find(|(_, id)| **id == ticket.id)
            .map(|(block, _)| *block)?;
        self.pending.remove(&block);
        Some(block)
    }

    /// Forget the upload for a removed block and shift later blocks down.
    pub(crate) fn remove_block(&mut self, index: usize) {
        self.pending = self
            .pending
            .drain()
            .filter_map(|(block, id)| match block.cmp(&index) {
                Ordering::Less => Some((block, id)),
                Ordering::Equal => None,
                Ordering::Greater => Some((block - 1, id)),
            })
            .collect();
    }

    /// Follow two blocks that traded places.
    pub(crate) fn swap_blocks(&mut self, a: usize, b: usize) {
        let at_a = self.pending.remove(&a);
        let at_b = self.pending.remove(&b);
        if let Some(id) = at_a {
            self.pending.insert(b, id);
        }
        if let Some(id) = at_b {
            self.pending.insert(a, id);
        }
    }

    /// Forget uploads for blocks at or past `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.pending.retain(|block, _| *block < len);
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
