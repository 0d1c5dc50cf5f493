//! Chunk-dispatch importer for EMotion FX actor, motion, motion set, node map and anim graph files.

/// File sniffing, chunk dispatch, versioned decoders and the objects they populate.
pub mod import;
