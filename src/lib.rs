pub mod collect;
pub mod extract;
pub mod fetch;
pub mod summary;
