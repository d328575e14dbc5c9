pub mod config_loader;
pub mod file_token_store;
pub mod memory_token_store;
pub mod paths;

pub use config_loader::{load_config, load_config_from};
pub use file_token_store::FileTokenStore;
pub use memory_token_store::MemoryTokenStore;
pub use paths::{PathError, PlazaPaths};
