// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const REGISTER_SUCCESS: &str = "register.success";
pub const REGISTER_CONFLICT: &str = "register.conflict";
pub const LOGIN_SUCCESS: &str = "login.success";
pub const LOGIN_FAILED: &str = "login.failed";
pub const TOKEN_REJECTED: &str = "token.rejected";
