pub mod hooks;
pub mod repository;
pub use repository::{find_repository, find_repository_in_path};
