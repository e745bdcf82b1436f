pub mod chunk;
pub mod error;
pub mod record;
pub mod scan;

pub use chunk::{Chunk, ChunkList};
pub use error::Error;
pub use record::{Record, RecordError, RecordType};
pub use scan::{ScanError, ScanSummary, StartAddress, scan};
