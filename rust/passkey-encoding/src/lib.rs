#![warn(missing_docs)]

//! Passkey Encoding - transport helpers shared by the passkey bridge crates
//!
//! WebAuthn hands every binary field to the application as base64url text,
//! device identifiers travel as hex, and ECDSA scalars arrive as
//! variable-width big-endian integers. This crate converts between those
//! representations and plain byte buffers.
//!
//! # Basic Usage
//!
//! ```rust
//! use passkey_encoding::{base64url_to_bytes, bytes_to_base64url, be_bytes_to_uint};
//!
//! // Padding is optional on input, and never emitted on output
//! assert_eq!(base64url_to_bytes("AQID").unwrap(), vec![1, 2, 3]);
//! assert_eq!(base64url_to_bytes("_-8").unwrap(), vec![0xff, 0xef]);
//! assert_eq!(bytes_to_base64url(&[0xff, 0xef]), "_-8");
//!
//! // DER sign padding is absorbed when widening to a fixed width
//! let fixed: [u8; 4] = be_bytes_to_uint(&[0x00, 0x80, 0x01]).unwrap();
//! assert_eq!(fixed, [0x00, 0x00, 0x80, 0x01]);
//! ```

mod error;
pub use error::*;

mod base64url;
pub use base64url::*;

mod hexadecimal;
pub use hexadecimal::*;

mod integer;
pub use integer::*;
