pub mod notify;
pub mod shared;

pub use notify::{AlertError, Client, Config, Context};
