//! Wire format for the serialized junction stack.
//!
//! Hosts snapshot scanner state to implement speculative and incremental
//! parsing, so encode and decode must invert each other exactly.
//!
//! # Wire Format
//!
//! ```text
//! offset 0: u8  depth          (0..=255)
//! then `depth` records, 3 bytes each:
//!   u8  kind                   (0 = conjunction, 1 = disjunction)
//!   i16 alignment column       (little-endian)
//! ```
//!
//! An empty buffer decodes to the empty stack. Anything that is not exactly
//! a depth byte followed by `depth` records is malformed; decode reports it
//! and the caller resets to the initial state.

use crate::error::StateError;
use crate::jlist::{JunctKind, JunctList, JunctStack, MAX_DEPTH};

/// Bytes per serialized junction record.
const RECORD_SIZE: usize = 3;

/// Largest possible serialized state.
pub const MAX_SERIALIZED_SIZE: usize = 1 + MAX_DEPTH * RECORD_SIZE;

/// Writes `stack` into `buffer`, returning the number of bytes written.
pub(crate) fn encode(stack: &JunctStack, buffer: &mut [u8]) -> Result<usize, StateError> {
    let depth = stack.depth();
    debug_assert!(depth <= MAX_DEPTH);
    let needed = 1 + depth * RECORD_SIZE;
    if buffer.len() < needed {
        return Err(StateError::BufferTooSmall {
            needed,
            available: buffer.len(),
        });
    }

    buffer[0] = depth as u8;
    let mut offset = 1;
    for record in stack.records() {
        buffer[offset] = record.kind as u8;
        buffer[offset + 1..offset + RECORD_SIZE]
            .copy_from_slice(&record.alignment_column.to_le_bytes());
        offset += RECORD_SIZE;
    }
    Ok(offset)
}

/// Reads a stack back out of `buffer`, or `None` if the buffer is malformed.
pub(crate) fn decode(buffer: &[u8]) -> Option<JunctStack> {
    if buffer.is_empty() {
        return Some(JunctStack::default());
    }

    let depth = buffer[0] as usize;
    if buffer.len() != 1 + depth * RECORD_SIZE {
        return None;
    }

    let mut lists = Vec::with_capacity(depth);
    for record in buffer[1..].chunks_exact(RECORD_SIZE) {
        let kind = match record[0] {
            0 => JunctKind::Conjunction,
            1 => JunctKind::Disjunction,
            _ => return None,
        };
        lists.push(JunctList {
            kind,
            alignment_column: i16::from_le_bytes([record[1], record[2]]),
        });
    }
    Some(JunctStack::from_records(lists))
}
