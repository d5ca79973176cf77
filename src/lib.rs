pub mod applets;
pub mod command_loop;
pub mod input;
pub mod listing;
pub mod logging;
pub mod spawn;
pub mod sysinfo;
