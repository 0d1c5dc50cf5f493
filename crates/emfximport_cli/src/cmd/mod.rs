/// Chunk listing command.
pub mod chunks;
/// Decoder matrix command.
pub mod decoders;
/// File-level information command.
pub mod info;
/// Full decode command.
pub mod load;

mod util;
