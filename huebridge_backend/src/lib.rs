pub mod init;
pub mod plugins;
pub mod utilities;

pub use init::async_main;
