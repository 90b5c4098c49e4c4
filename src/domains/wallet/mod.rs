// Wallet domain
// 지갑 도메인: 잔액 조회, 입금/출금
pub mod models;
pub mod services;
pub mod handlers;
pub mod routes;
