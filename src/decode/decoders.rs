use crate::decode::expand::insert_entry;
use crate::decode::parser::{
    is_keyless_header, looks_like_key_value, parse_header_line, parse_key_token,
    parse_primitive_token, split_delimited, ArrayHeader, HeaderLine,
};
use crate::decode::scanner::{scan, LineCursor};
use crate::decode::validation::{
    check_count, check_no_blank_lines, check_no_surplus_list_items, check_no_surplus_rows,
    is_list_item,
};
use crate::error::{Result, ToonError};
use crate::options::{DecodeOptions, ExpandPaths};
use crate::shared::constants::LIST_ITEM_PREFIX;
use crate::value::{Object, Value};

#[derive(Debug, Clone, Copy)]
struct Context {
    strict: bool,
    expand: ExpandPaths,
}

impl Context {
    fn insert(&self, entries: &mut Object, key: String, was_quoted: bool, value: Value) -> Result<()> {
        insert_entry(entries, key, was_quoted, value, self.expand, self.strict)
    }
}

/// Decode a TOON document into a value tree.
pub(crate) fn decode_document(input: &str, options: &DecodeOptions) -> Result<Value> {
    let (lines, blanks) = scan(input, options.indent, options.strict)?;
    if lines.is_empty() {
        return Err(ToonError::input("cannot decode empty input"));
    }

    let single_line = lines.len() == 1;
    let mut cursor = LineCursor::new(lines, blanks);
    let ctx = Context {
        strict: options.strict,
        expand: options.expand_paths,
    };

    let first = cursor
        .peek()
        .cloned()
        .ok_or_else(|| ToonError::input("cannot decode empty input"))?;

    let value = if is_keyless_header(&first.content) {
        if let Some(header_line) = parse_header_line(&first.content, first.line_number)? {
            cursor.advance();
            decode_array(header_line, &mut cursor, first.depth, first.line_number, ctx)?
        } else {
            decode_root_object(&mut cursor, ctx)?
        }
    } else if single_line && !looks_like_key_value(&first.content) {
        cursor.advance();
        parse_primitive_token(&first.content, first.line_number)?
    } else {
        decode_root_object(&mut cursor, ctx)?
    };

    if ctx.strict {
        if let Some(line) = cursor.peek() {
            return Err(ToonError::layout(
                line.line_number,
                "unexpected content past the end of the document",
            ));
        }
    }

    Ok(value)
}

fn decode_root_object(cursor: &mut LineCursor, ctx: Context) -> Result<Value> {
    let mut entries = Object::new();

    // The first line is consumed regardless of its depth; siblings must sit
    // at depth 0.
    if let Some(first) = cursor.peek().cloned() {
        cursor.advance();
        let (key, was_quoted, value) =
            decode_key_value(&first.content, first.depth, first.line_number, cursor, ctx)?;
        ctx.insert(&mut entries, key, was_quoted, value)?;
    }

    while let Some(line) = cursor.peek().cloned() {
        if line.depth != 0 {
            break;
        }
        cursor.advance();
        let (key, was_quoted, value) =
            decode_key_value(&line.content, line.depth, line.line_number, cursor, ctx)?;
        ctx.insert(&mut entries, key, was_quoted, value)?;
    }

    Ok(Value::Object(entries))
}

/// Decode one key-value line, consuming any nested lines its value owns.
fn decode_key_value(
    content: &str,
    depth: usize,
    line_number: usize,
    cursor: &mut LineCursor,
    ctx: Context,
) -> Result<(String, bool, Value)> {
    if let Some(header_line) = parse_header_line(content, line_number)? {
        let Some(key) = header_line.header.key.clone() else {
            return Err(ToonError::grammar(
                line_number,
                "Array header inside an object requires a key",
            ));
        };
        let value = decode_array(header_line, cursor, depth, line_number, ctx)?;
        return Ok((key, false, value));
    }

    let (key, rest_start, was_quoted) = parse_key_token(content, line_number)?;
    let rest = content[rest_start..].trim();

    if rest.is_empty() {
        if let Some(next) = cursor.peek() {
            if next.depth > depth {
                let value = decode_object_block(cursor, ctx)?;
                return Ok((key, was_quoted, value));
            }
        }
        return Ok((key, was_quoted, Value::Object(Object::new())));
    }

    Ok((key, was_quoted, parse_primitive_token(rest, line_number)?))
}

/// Decode a nested object block whose depth is set by its first line.
fn decode_object_block(cursor: &mut LineCursor, ctx: Context) -> Result<Value> {
    let mut entries = Object::new();
    let Some(first) = cursor.peek() else {
        return Ok(Value::Object(entries));
    };
    let block_depth = first.depth;

    while let Some(line) = cursor.peek().cloned() {
        if line.depth != block_depth {
            break;
        }
        cursor.advance();
        let (key, was_quoted, value) =
            decode_key_value(&line.content, line.depth, line.line_number, cursor, ctx)?;
        ctx.insert(&mut entries, key, was_quoted, value)?;
    }

    Ok(Value::Object(entries))
}

/// Decode an array given its parsed header, dispatching on shape: inline
/// tail, tabular block, or list items.
fn decode_array(
    header_line: HeaderLine,
    cursor: &mut LineCursor,
    base_depth: usize,
    header_line_number: usize,
    ctx: Context,
) -> Result<Value> {
    let HeaderLine { header, inline } = header_line;

    if let Some(tail) = inline {
        let tokens = split_delimited(&tail, header.delimiter);
        let mut items = Vec::with_capacity(tokens.len());
        for token in &tokens {
            items.push(parse_primitive_token(token, header_line_number)?);
        }
        check_count(
            items.len(),
            header.length,
            "inline array items",
            header_line_number,
            ctx.strict,
        )?;
        return Ok(Value::Array(items));
    }

    if let Some(fields) = header.fields.clone() {
        return decode_tabular_rows(&header, &fields, cursor, base_depth, header_line_number, ctx);
    }

    decode_list_items(&header, cursor, base_depth, header_line_number, ctx)
}

fn decode_tabular_rows(
    header: &ArrayHeader,
    fields: &[String],
    cursor: &mut LineCursor,
    base_depth: usize,
    header_line_number: usize,
    ctx: Context,
) -> Result<Value> {
    let row_depth = base_depth + 1;
    let mut rows = Vec::with_capacity(header.length);
    let mut first_row: Option<usize> = None;
    let mut last_row: Option<usize> = None;

    while rows.len() < header.length {
        let Some(line) = cursor.peek().cloned() else {
            break;
        };
        if line.depth != row_depth || is_list_item(&line.content) {
            break;
        }
        cursor.advance();
        first_row.get_or_insert(line.line_number);
        last_row = Some(line.line_number);

        let cells = split_delimited(&line.content, header.delimiter);
        check_count(
            cells.len(),
            fields.len(),
            "tabular row values",
            line.line_number,
            ctx.strict,
        )?;

        let mut row = Object::new();
        for (idx, field) in fields.iter().enumerate() {
            let value = match cells.get(idx) {
                Some(cell) => parse_primitive_token(cell, line.line_number)?,
                None => Value::Null,
            };
            ctx.insert(&mut row, field.clone(), false, value)?;
        }
        rows.push(Value::Object(row));
    }

    check_count(
        rows.len(),
        header.length,
        "tabular rows",
        header_line_number,
        ctx.strict,
    )?;
    if let (Some(start), Some(end)) = (first_row, last_row) {
        check_no_blank_lines(start, end, cursor.blank_lines(), "a tabular array", ctx.strict)?;
    }
    check_no_surplus_rows(cursor.peek(), row_depth, header, ctx.strict)?;

    Ok(Value::Array(rows))
}

fn decode_list_items(
    header: &ArrayHeader,
    cursor: &mut LineCursor,
    base_depth: usize,
    header_line_number: usize,
    ctx: Context,
) -> Result<Value> {
    let item_depth = base_depth + 1;
    let mut items = Vec::with_capacity(header.length);
    let mut first_item: Option<usize> = None;
    let mut last_item: Option<usize> = None;

    while items.len() < header.length {
        let Some(line) = cursor.peek().cloned() else {
            break;
        };
        if line.depth != item_depth || !is_list_item(&line.content) {
            break;
        }
        first_item.get_or_insert(line.line_number);
        items.push(decode_list_item(&line.content, item_depth, line.line_number, cursor, ctx)?);
        last_item = cursor.last_line_number().or(Some(line.line_number));
    }

    check_count(
        items.len(),
        header.length,
        "list array items",
        header_line_number,
        ctx.strict,
    )?;
    if let (Some(start), Some(end)) = (first_item, last_item) {
        check_no_blank_lines(start, end, cursor.blank_lines(), "a list array", ctx.strict)?;
    }
    check_no_surplus_list_items(cursor.peek(), item_depth, header.length, ctx.strict)?;

    Ok(Value::Array(items))
}

/// Decode one `- ` list item: the content after the marker is re-dispatched
/// as an array header, an object's first field, or a primitive.
fn decode_list_item(
    content: &str,
    item_depth: usize,
    line_number: usize,
    cursor: &mut LineCursor,
    ctx: Context,
) -> Result<Value> {
    cursor.advance();

    let after = content
        .strip_prefix(LIST_ITEM_PREFIX)
        .map(str::trim_end)
        .unwrap_or_default();
    if after.trim().is_empty() {
        return Ok(Value::Object(Object::new()));
    }

    if let Some(header_line) = parse_header_line(after, line_number)? {
        if header_line.header.key.is_none() {
            return decode_array(header_line, cursor, item_depth, line_number, ctx);
        }

        // Keyed array as the first field of an object item; its children
        // sit one level below the item's fields.
        let key = header_line.header.key.clone().unwrap_or_default();
        let mut entries = Object::new();
        let value = decode_array(header_line, cursor, item_depth + 1, line_number, ctx)?;
        ctx.insert(&mut entries, key, false, value)?;
        decode_item_fields(&mut entries, cursor, item_depth + 1, ctx)?;
        return Ok(Value::Object(entries));
    }

    if looks_like_key_value(after) {
        let mut entries = Object::new();
        let (key, was_quoted, value) =
            decode_key_value(after, item_depth + 1, line_number, cursor, ctx)?;
        ctx.insert(&mut entries, key, was_quoted, value)?;
        decode_item_fields(&mut entries, cursor, item_depth + 1, ctx)?;
        return Ok(Value::Object(entries));
    }

    parse_primitive_token(after, line_number)
}

/// Consume the remaining fields of a list-item object: key-value lines at
/// the field depth that are not themselves list items.
fn decode_item_fields(
    entries: &mut Object,
    cursor: &mut LineCursor,
    field_depth: usize,
    ctx: Context,
) -> Result<()> {
    while let Some(line) = cursor.peek().cloned() {
        if line.depth != field_depth || is_list_item(&line.content) {
            break;
        }
        cursor.advance();
        let (key, was_quoted, value) =
            decode_key_value(&line.content, line.depth, line.line_number, cursor, ctx)?;
        ctx.insert(entries, key, was_quoted, value)?;
    }
    Ok(())
}
