pub mod album;
pub mod art;
pub mod release_date;
pub mod sanitize;
pub mod tralbum;

pub use album::*;
pub use tralbum::{decode, encode, DecodeError};
