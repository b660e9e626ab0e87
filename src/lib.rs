//! A Rust implementation of 12-byte MongoDB-style object identifiers
//!
//! ```rust
//! use objectid::objectid;
//!
//! let id = objectid();
//! println!("{}", id); // e.g. "65f1c3a09d4b2e07c1ff0004"
//! println!("{:?}", id.as_bytes()); // as 12-byte big-endian array
//!
//! let parsed = objectid::parse(&id.to_string())?;
//! assert_eq!(parsed, id);
//! # Ok::<(), objectid::ParseError>(())
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    machine                    |      pid      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      pid      |                    counter                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 32-bit `timestamp` field holds the Unix timestamp in seconds.
//! - The 24-bit `machine` field holds the first three bytes of the SHA-256 digest of the host
//!   name.
//! - The 16-bit `pid` field holds the lowest 16 bits of the process ID.
//! - The 24-bit `counter` field is incremented by one for each new ID generated in the process and
//!   is randomly initialized at process start. The counter wraps around to zero after `0xffffff`.
//!
//! All fields are stored in big-endian byte order, and the canonical string representation is the
//! 24-digit lowercase hexadecimal encoding of the twelve bytes.
//!
//! # Crate features
//!
//! - `serde`: (de)serializes object IDs as strings in human-readable formats and as 12-byte arrays
//!   in compact formats.
//! - `chrono`: converts object IDs into their creation time as `chrono::DateTime<Utc>`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::ObjectId;

mod error;
pub use error::{HostError, ParseError, ParseErrorKind};

mod context;
pub use context::Context;

mod global_gen;
pub use global_gen::{global_context, objectid, parse};
