/// Objects populated by the importer.
pub mod asset;

mod chunk;
mod context;
mod decode;
mod dispatch;
mod endian;
mod error;
mod header;
mod importer;
mod math;
mod registry;
mod scan;
mod settings;
mod source;

/// Chunk header, bounded payload reader and chunk identifiers.
pub use chunk::{ChunkHeader, ChunkReader, INVALID_INDEX, ids};
/// Per-import shared decode context.
pub use context::{ContextKind, GraphNodeTable, MotionSetTable, PendingConnection, SharedData, SharedEntry, StringScratch};
/// Chunk dispatch loop and per-import state.
pub use dispatch::{ImportState, Target, dispatch_all, process_next_chunk};
/// Byte order of a file and field conversion into native order.
pub use endian::{Endian, convert_color, convert_f32, convert_i16, convert_i32, convert_quat, convert_u16, convert_u32, convert_vec2, convert_vec3, convert_vec4};
/// Error and result types.
pub use error::{ImportError, Result};
/// File headers and the file-kind sniffer.
pub use header::{FileHeader, FileKind, GraphCounts, GraphInfo, classify};
/// Loader entry points.
pub use importer::{Asset, Importer, SettingsBundle};
/// Small math value types.
pub use math::{Color, Quat, Vec2, Vec3, Vec4};
/// Decoder registry keyed by chunk id and version.
pub use registry::{DecodeFn, DecoderUnit, Registry};
/// Chunk listing without decoding.
pub use scan::{ChunkScan, ChunkStats, ScannedChunk, scan_chunk_stats};
/// Per-kind import settings.
pub use settings::{ActorSettings, AnimGraphSettings, ImportSettings, MotionSetSettings, NodeMapSettings, SkeletalMotionSettings};
/// Random-access byte sources.
pub use source::{ByteSource, ReaderSource, SliceSource};
