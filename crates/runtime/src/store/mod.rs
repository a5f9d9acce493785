//! Persistence adapters for the progress store collaborator.

mod file;

pub use file::FileProgressStore;
