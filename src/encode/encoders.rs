use crate::encode::primitives::{encode_key, format_header, join_primitives, primitive_text};
use crate::encode::writer::LineWriter;
use crate::options::EncodeOptions;
use crate::shared::constants::LIST_ITEM_MARKER;
use crate::value::{Object, Value};

/// How a sequence is rendered, decided per the structural classifier: all
/// primitives inline on the header line, arrays-of-primitive-arrays as one
/// list item per row, homogeneous objects as a tabular block, anything else
/// as a list of items.
enum ArrayLayout {
    Inline,
    NestedRows,
    Tabular(Vec<String>),
    List,
}

pub(crate) fn write_document(value: &Value, out: &mut LineWriter, options: &EncodeOptions) {
    match value {
        Value::Array(items) => write_array(None, items, 0, options, out),
        Value::Object(entries) => write_object(entries, 0, options, out),
        primitive => {
            if let Some(text) = primitive_text(primitive, options.delimiter) {
                out.push(0, &text);
            }
        }
    }
}

fn write_object(entries: &Object, depth: usize, options: &EncodeOptions, out: &mut LineWriter) {
    for (key, value) in entries {
        write_key_value(key, value, depth, options, out);
    }
}

fn write_key_value(
    key: &str,
    value: &Value,
    depth: usize,
    options: &EncodeOptions,
    out: &mut LineWriter,
) {
    match value {
        Value::Array(items) => write_array(Some(key), items, depth, options, out),
        Value::Object(entries) => {
            out.push(depth, &format!("{}:", encode_key(key)));
            write_object(entries, depth + 1, options, out);
        }
        primitive => {
            if let Some(text) = primitive_text(primitive, options.delimiter) {
                out.push(depth, &format!("{}: {text}", encode_key(key)));
            }
        }
    }
}

fn classify(items: &[Value]) -> ArrayLayout {
    if items.iter().all(Value::is_primitive) {
        return ArrayLayout::Inline;
    }
    if items.iter().all(|item| {
        item.as_array()
            .is_some_and(|inner| inner.iter().all(Value::is_primitive))
    }) {
        return ArrayLayout::NestedRows;
    }
    if let Some(fields) = tabular_fields(items) {
        return ArrayLayout::Tabular(fields);
    }
    ArrayLayout::List
}

/// Field list for a tabular rendering: every element is an object with the
/// first row's exact key sequence (same keys, same insertion order) and
/// every cell is a primitive. Key reordering never happens here.
fn tabular_fields(items: &[Value]) -> Option<Vec<String>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }

    for item in items {
        let row = item.as_object()?;
        if row.len() != first.len() {
            return None;
        }
        for ((key, value), field) in row.iter().zip(first.keys()) {
            if key != field || !value.is_primitive() {
                return None;
            }
        }
    }

    Some(first.keys().cloned().collect())
}

fn write_array(
    key: Option<&str>,
    items: &[Value],
    depth: usize,
    options: &EncodeOptions,
    out: &mut LineWriter,
) {
    match classify(items) {
        ArrayLayout::Inline => {
            out.push(depth, &inline_array_line(key, items, options));
        }
        ArrayLayout::NestedRows => {
            out.push(depth, &format_header(key, items.len(), None, options));
            for item in items {
                if let Value::Array(inner) = item {
                    out.push_list_item(depth + 1, &inline_array_line(None, inner, options));
                }
            }
        }
        ArrayLayout::Tabular(fields) => {
            out.push(
                depth,
                &format_header(key, items.len(), Some(&fields), options),
            );
            write_tabular_rows(items, depth + 1, options, out);
        }
        ArrayLayout::List => {
            out.push(depth, &format_header(key, items.len(), None, options));
            for item in items {
                write_list_item(item, depth + 1, options, out);
            }
        }
    }
}

fn inline_array_line(key: Option<&str>, items: &[Value], options: &EncodeOptions) -> String {
    let header = format_header(key, items.len(), None, options);
    if items.is_empty() {
        return header;
    }
    format!("{header} {}", join_primitives(items, options.delimiter))
}

fn write_tabular_rows(
    rows: &[Value],
    depth: usize,
    options: &EncodeOptions,
    out: &mut LineWriter,
) {
    for row in rows {
        if let Value::Object(entries) = row {
            out.push(depth, &join_primitives(entries.values(), options.delimiter));
        }
    }
}

fn write_list_item(value: &Value, depth: usize, options: &EncodeOptions, out: &mut LineWriter) {
    match value {
        Value::Array(items) => {
            if items.iter().all(Value::is_primitive) {
                out.push_list_item(depth, &inline_array_line(None, items, options));
            } else {
                out.push_list_item(depth, &format_header(None, items.len(), None, options));
                for item in items {
                    write_list_item(item, depth + 1, options, out);
                }
            }
        }
        Value::Object(entries) => write_object_list_item(entries, depth, options, out),
        primitive => {
            if let Some(text) = primitive_text(primitive, options.delimiter) {
                out.push_list_item(depth, &text);
            }
        }
    }
}

/// A list-item object puts its first key on the `- ` line; the remaining
/// keys follow one level deeper, aligned with the first key's content.
fn write_object_list_item(
    entries: &Object,
    depth: usize,
    options: &EncodeOptions,
    out: &mut LineWriter,
) {
    let Some((first_key, first_value)) = entries.first() else {
        out.push(depth, LIST_ITEM_MARKER);
        return;
    };

    match first_value {
        Value::Array(items) => {
            if let Some(fields) = tabular_fields(items) {
                out.push_list_item(
                    depth,
                    &format_header(Some(first_key), items.len(), Some(&fields), options),
                );
                write_tabular_rows(items, depth + 2, options, out);
            } else if items.iter().all(Value::is_primitive) {
                out.push_list_item(depth, &inline_array_line(Some(first_key), items, options));
            } else {
                out.push_list_item(
                    depth,
                    &format_header(Some(first_key), items.len(), None, options),
                );
                for item in items {
                    write_list_item(item, depth + 2, options, out);
                }
            }
        }
        Value::Object(sub) => {
            out.push_list_item(depth, &format!("{}:", encode_key(first_key)));
            write_object(sub, depth + 2, options, out);
        }
        primitive => {
            if let Some(text) = primitive_text(primitive, options.delimiter) {
                out.push_list_item(depth, &format!("{}: {text}", encode_key(first_key)));
            }
        }
    }

    for (key, value) in entries.iter().skip(1) {
        write_key_value(key, value, depth + 1, options, out);
    }
}
