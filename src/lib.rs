//! Codec for TOON (Token-Oriented Object Notation): a human-readable,
//! indentation-structured interchange format that stays compact for
//! homogeneous object collections by rendering them as tabular blocks.
//!
//! The crate exposes a pure, synchronous pair of entry points over a
//! dynamic [`Value`] tree:
//!
//! ```
//! use toon_codec::{decode, encode, DecodeOptions, EncodeOptions, Value};
//!
//! let value = Value::Object(
//!     [("tags".to_string(), Value::from(vec!["AI", "Gardening", "Mobile"]))]
//!         .into_iter()
//!         .collect(),
//! );
//!
//! let text = encode(&value, &EncodeOptions::default());
//! assert_eq!(text, "tags[3]: AI,Gardening,Mobile");
//!
//! let back = decode(&text, &DecodeOptions::default()).unwrap();
//! assert_eq!(back, value);
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
pub mod error;
pub mod options;
mod shared;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{Result, ToonError};
pub use options::{DecodeOptions, Delimiter, EncodeOptions, ExpandPaths, KeyFolding};
pub use value::{Object, Value};

/// Convenience wrapper: parse JSON text and encode it as TOON.
///
/// For lower-level control, build a [`Value`] yourself and call [`encode`].
///
/// # Errors
///
/// Returns an error if the JSON input is invalid.
pub fn json_to_toon(json: &str) -> Result<String> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Ok(encode(&Value::from(parsed), &EncodeOptions::default()))
}

/// Convenience wrapper: decode TOON and return compact JSON text.
///
/// For lower-level control, call [`decode`] and handle the [`Value`]
/// directly.
///
/// # Errors
///
/// Returns an error if the TOON input is invalid.
pub fn toon_to_json(toon: &str) -> Result<String> {
    let value = decode(toon, &DecodeOptions::default())?;
    let json = serde_json::Value::from(value);
    Ok(serde_json::to_string(&json)?)
}
