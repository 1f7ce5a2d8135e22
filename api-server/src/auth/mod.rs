//! 认证模块
//!
//! - [`jwt`] - JWT 令牌服务
//! - [`password`] - Argon2 密码哈希
//! - [`middleware`] - 认证中间件
//! - [`extractor`] - CurrentUser 提取器

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use extractor::MaybeUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::authenticate;
pub use password::{hash_password, verify_password};
