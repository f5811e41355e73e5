//! Domain types. Plain data plus the small amount of logic that belongs to the
//! data itself (password digests, tag normalization, ID parsing).

pub mod id;
pub mod item;
pub mod session;
pub mod user;

pub use id::*;
pub use item::*;
pub use session::*;
pub use user::*;
