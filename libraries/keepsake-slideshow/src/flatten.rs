//! Memory collection to slide sequence
//!
//! Only photo entries contribute slides. Each media URI of a photo entry
//! becomes one slide, in record order and then URI order.

use crate::types::Slide;
use keepsake_core::MemoryRecord;

/// Flatten memories into the ordered slide sequence
///
/// An empty or video-only collection yields an empty sequence; that is a
/// normal result, not an error.
pub fn flatten(memories: &[MemoryRecord]) -> Vec<Slide> {
    memories
        .iter()
        .filter(|memory| memory.entry.is_photo())
        .flat_map(|memory| memory.entry.media_uris.iter().map(move |uri| (memory, uri)))
        .enumerate()
        .map(|(position, (memory, uri))| Slide {
            memory_id: memory.id.clone(),
            entry_id: memory.entry.id.clone(),
            media_uri: uri.clone(),
            caption: memory.entry.caption.clone(),
            years_ago: memory.years_ago,
            year: memory.year,
            position,
        })
        .collect()
}

/// Number of slides `flatten` would produce, without allocating them
pub fn count_slides(memories: &[MemoryRecord]) -> usize {
    memories
        .iter()
        .filter(|memory| memory.entry.is_photo())
        .map(|memory| memory.entry.media_uris.len())
        .sum()
}
