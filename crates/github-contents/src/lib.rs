//! GitHub repository contents client
//!
//! Lists the entries of a directory inside a hosted repository through
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`.
//!
//! # Example
//!
//! ```no_run
//! use github_contents::{ContentsClient, ContentsConfig};
//!
//! # async fn example() -> Result<(), github_contents::ContentsError> {
//! let client = ContentsClient::new(ContentsConfig::new("buxuele", "next-js-ideas-app"))?;
//!
//! for entry in client.list_directory(&["public", "imgs"]).await? {
//!     println!("{} ({:?})", entry.name, entry.entry_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client reports every failure (transport, timeout, non-success status,
//! unexpected payload) as a [`ContentsError`]; deciding how to degrade is left
//! to the caller.

mod client;
mod error;
mod types;

pub use client::{encode_segments, ContentsClient, ContentsConfig};
pub use error::{ContentsError, Result};
pub use types::{ContentEntry, EntryType};
