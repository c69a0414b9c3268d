//! Command implementations

pub mod doctor;
pub mod init;
pub mod launch;
pub mod version;
