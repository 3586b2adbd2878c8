mod audio;
mod ids;
mod memory;

pub use audio::AudioHandle;
pub use ids::{EntryId, MemoryId};
pub use memory::{EntryType, MemoryEntry, MemoryRecord};
