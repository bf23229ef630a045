mod decoders;
mod expand;
mod parser;
mod scanner;
mod validation;

use crate::error::Result;
use crate::options::DecodeOptions;
use crate::value::Value;

/// Decode TOON text into a value tree.
///
/// In strict mode (the default) declared lengths, indentation rules, and
/// blank-line policy are enforced; non-strict decode tolerates count and
/// layout anomalies but grammar errors remain fatal.
///
/// # Errors
///
/// Returns a [`ToonError`](crate::ToonError) when the input is empty, does
/// not conform to the grammar, or violates strict-mode validation.
pub fn decode(input: &str, options: &DecodeOptions) -> Result<Value> {
    decoders::decode_document(input, options)
}
