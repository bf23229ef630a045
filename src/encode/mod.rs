mod encoders;
mod folding;
mod normalize;
mod primitives;
mod writer;

use crate::options::{EncodeOptions, KeyFolding};
use crate::value::Value;

/// Encode a value tree as TOON text.
///
/// Encoding is total: normalization coerces non-finite numbers to null and
/// negative zero to zero rather than erroring. The output carries no
/// trailing newline.
#[must_use]
pub fn encode(value: &Value, options: &EncodeOptions) -> String {
    let normalized = normalize::normalize(value);
    let tree = if options.key_folding == KeyFolding::Safe {
        folding::fold_keys(normalized, options.flatten_depth)
    } else {
        normalized
    };

    let mut out = writer::LineWriter::new(options.indent);
    encoders::write_document(&tree, &mut out, options);
    out.finish()
}
