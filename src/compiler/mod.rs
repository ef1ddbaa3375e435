pub mod archive;
pub mod converter;
pub mod loader;
pub mod packager;
