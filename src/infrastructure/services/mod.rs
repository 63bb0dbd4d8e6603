//! Stack service implementations

mod command;

pub use command::CommandServices;
