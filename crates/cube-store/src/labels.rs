//! Fixed-width encoding of coordinate labels.
//!
//! Labels are stored as NUL-padded byte strings of a fixed width, one array
//! element per label.

use crate::error::{Result, StoreError};

/// Pack labels into consecutive `width`-byte, NUL-padded slots.
pub fn encode_labels<S: AsRef<str>>(labels: &[S], width: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; labels.len() * width];

    for (slot, label) in bytes.chunks_exact_mut(width).zip(labels) {
        let label = label.as_ref().as_bytes();
        if label.len() > width {
            return Err(StoreError::LabelTooLong {
                label: String::from_utf8_lossy(label).into_owned(),
                width,
            });
        }
        slot[..label.len()].copy_from_slice(label);
    }

    Ok(bytes)
}

/// Inverse of [`encode_labels`].
pub fn decode_labels(bytes: &[u8], width: usize) -> Result<Vec<String>> {
    if width == 0 || bytes.len() % width != 0 {
        return Err(StoreError::InvalidMetadata(format!(
            "{} label bytes are not a multiple of width {}",
            bytes.len(),
            width
        )));
    }

    bytes
        .chunks_exact(width)
        .map(|slot| {
            let end = slot.iter().position(|&b| b == 0).unwrap_or(width);
            String::from_utf8(slot[..end].to_vec())
                .map_err(|e| StoreError::InvalidMetadata(e.to_string()))
        })
        .collect()
}
