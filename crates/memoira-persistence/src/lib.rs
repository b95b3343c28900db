pub mod autosave;
pub mod codec;
pub mod state_store;
pub mod store;
pub mod traits;

pub use autosave::AutoSaver;
pub use state_store::NoteStore;
pub use store::*;
pub use traits::*;
