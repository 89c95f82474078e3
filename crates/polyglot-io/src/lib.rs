pub mod speech;
pub mod storage;

pub use speech::{CommandBackend, SpeechBackend, SpeechError, Speaker};
pub use storage::FileStore;
