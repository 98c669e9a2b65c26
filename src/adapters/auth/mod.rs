//! Authentication adapters.
//!
//! - `JwtSessionValidator` - HS256 bearer tokens signed with a shared secret
//! - `MockSessionValidator` - fixed token table for tests

mod jwt;
mod mock;

pub use jwt::JwtSessionValidator;
pub use mock::MockSessionValidator;
