// Domains module
pub mod wallet;
