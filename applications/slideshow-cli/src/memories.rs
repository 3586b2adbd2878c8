/// Memory collection loading
use crate::error::Result;
use keepsake_core::MemoryRecord;
use std::path::Path;
use tracing::debug;

/// Read a JSON array of memory records
pub fn load_memories(path: &Path) -> Result<Vec<MemoryRecord>> {
    let contents = std::fs::read_to_string(path)?;
    let memories: Vec<MemoryRecord> = serde_json::from_str(&contents)?;
    debug!("Loaded {} memories from {}", memories.len(), path.display());
    Ok(memories)
}
