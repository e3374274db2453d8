pub mod download;
pub mod extract;
pub mod releases;
pub mod workspace;
