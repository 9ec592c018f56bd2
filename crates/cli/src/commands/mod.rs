pub mod build;
pub mod export;
pub mod image;
pub mod init;
pub mod preview;
pub mod project;
pub mod validate;
