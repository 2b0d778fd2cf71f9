//! # pantry-auth
//!
//! Authentication primitives for Smart Pantry: JWT access/refresh token
//! encoding and validation, plus Argon2id password hashing.

pub mod jwt;
pub mod password;

pub use jwt::claims::{Claims, TokenType};
pub use jwt::decoder::JwtDecoder;
pub use jwt::encoder::{JwtEncoder, TokenPair};
pub use password::hasher::PasswordHasher;
