//! Turns storefront album pages into directories of tagged MP3 files.
//!
//! [`Materializer`] drives the whole pipeline over any [`Fetcher`];
//! [`HttpFetcher`] is the real network.

pub mod album;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod output;
pub mod storefront;
pub mod tag;
pub mod target;

#[cfg(test)]
pub(crate) mod testing;

pub use album::{MaterializeOptions, Materializer};
pub use error::MaterializeError;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use storefront::{AlbumFailure, StorefrontReport};
pub use tag::TagError;
pub use target::{classify, Target, TargetError};
