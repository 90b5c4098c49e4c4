// Wallet API library
// 통합 테스트에서 도메인/공유 모듈에 접근하기 위해 공개
pub mod domains;
pub mod shared;
pub mod routes;
