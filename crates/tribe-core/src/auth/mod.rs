//! Authentication: token codec, credential extraction, access guard.

pub mod extract;
pub mod guard;
pub mod token;

pub use extract::{extract_token, RequestLike, RequestParts, TOKEN_COOKIE};
pub use guard::{AccessGuard, AuthError, RoleError};
pub use token::{Claims, TokenCodec, TokenError, AUTH_PURPOSE, TOKEN_TTL_SECS};
