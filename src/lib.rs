//! Bencode codec and torrent metadata extraction.
//!
//! ```
//! use torrent_meta::bencode::{decode, encode, Value};
//!
//! let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
//! assert_eq!(value.get(b"cow"), Some(&Value::from("moo")));
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```

pub mod bencode;
pub mod error;
pub mod torrent;

pub use error::{BencodeError, Error, MetainfoError, Result};
