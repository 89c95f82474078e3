pub mod error;
pub mod history;
pub mod language;
pub mod orchestrator;
pub mod preferences;
pub mod store;

pub use error::StoreError;
pub use history::History;
pub use orchestrator::translate_all;
pub use preferences::Preferences;
pub use store::{KeyValueStore, MemoryStore, PreferenceStore, Restored};
