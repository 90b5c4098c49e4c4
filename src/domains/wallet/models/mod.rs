// Wallet domain models
pub mod wallet;
pub mod operation;
pub mod dto;

pub use wallet::*;
pub use operation::*;
pub use dto::*;
