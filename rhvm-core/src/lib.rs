pub mod capabilities;
pub mod config;
pub mod controller;
pub mod error;
pub mod operations;
pub mod power;
pub mod provider;
pub mod storage;
pub mod types;
pub mod unregister;


pub use capabilities::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use operations::*;
pub use power::*;
pub use provider::*;
pub use storage::*;
pub use types::*;
pub use unregister::*;
