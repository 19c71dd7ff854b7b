pub mod infrastructure;
pub mod modules;
pub mod shared;
