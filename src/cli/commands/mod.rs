pub mod check;
mod command_result;
pub mod helper;
pub mod hierarchy;
pub mod init;

pub use command_result::*;
