//! Line-oriented reader for opcode definition tables.

use super::{InstructionRecord, Prefix, TypeToken, ValueType};
use crate::core::{GenError, GenResult};

/// Columns in the short layout: types, flags, code and quoted mnemonic.
pub const MIN_FIELDS: usize = 8;

/// Columns in the wabt layout, which adds an identifier before the mnemonic.
pub const MAX_FIELDS: usize = 9;

/// Why a well-formed row was left out of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    VectorResult,
    Prefixed(u8),
}

/// Outcome of parsing one marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRow {
    Retained(InstructionRecord),
    Dropped {
        text: String,
        code: u8,
        reason: DropReason,
    },
}

/// Read every marker line and return the retained records in source order.
pub fn read_definitions<I, S>(lines: I, marker: &str) -> GenResult<Vec<InstructionRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(read_rows(lines, marker)?
        .into_iter()
        .filter_map(|row| match row {
            ParsedRow::Retained(record) => Some(record),
            ParsedRow::Dropped { .. } => None,
        })
        .collect())
}

/// Like [`read_definitions`] but keeps the dropped rows too.
pub fn read_rows<I, S>(lines: I, marker: &str) -> GenResult<Vec<ParsedRow>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rows = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(row) = parse_record(line.as_ref(), idx + 1, marker)? {
            rows.push(row);
        }
    }
    log::debug!("read {} definition rows", rows.len());
    Ok(rows)
}

/// Parse a single line. Returns `Ok(None)` for lines without the marker.
pub fn parse_record(line: &str, line_no: usize, marker: &str) -> GenResult<Option<ParsedRow>> {
    let Some(args) = line
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_prefix('('))
    else {
        return Ok(None);
    };

    let body = strip_wrapper(args).map_err(|reason| GenError::malformed(line_no, reason))?;
    let fields: Vec<&str> = body.split(',').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return Err(GenError::malformed(
            line_no,
            format!("expected at least {MIN_FIELDS} fields, found {}", fields.len()),
        ));
    }
    if fields.len() > MAX_FIELDS {
        return Err(GenError::malformed(
            line_no,
            format!("expected at most {MAX_FIELDS} fields, found {}", fields.len()),
        ));
    }

    let parse_type = |field: &str| {
        TypeToken::parse(field)
            .ok_or_else(|| GenError::malformed(line_no, format!("unknown value type `{field}`")))
    };
    let parse_byte = |what: &str, field: &str| {
        parse_u8(field).ok_or_else(|| {
            GenError::malformed(line_no, format!("invalid {what} `{field}`, expected 0..=255"))
        })
    };

    let result = parse_type(fields[0])?;
    let operands = [
        parse_type(fields[1])?,
        parse_type(fields[2])?,
        parse_type(fields[3])?,
    ];
    let memory = parse_byte("memory flag", fields[4])?;
    let prefix = Prefix::from_byte(parse_byte("prefix", fields[5])?);
    let code = parse_byte("opcode", fields[6])?;
    let name = if fields.len() == MAX_FIELDS {
        Some(parse_name(fields[7]).map_err(|reason| GenError::malformed(line_no, reason))?)
    } else {
        None
    };
    let text = parse_text(fields[fields.len() - 1])
        .map_err(|reason| GenError::malformed(line_no, reason))?;

    if result == TypeToken::V128 {
        log::debug!("line {line_no}: dropping {text:?}, vector result type");
        return Ok(Some(ParsedRow::Dropped {
            text,
            code,
            reason: DropReason::VectorResult,
        }));
    }
    if let Prefix::Byte(byte) = prefix {
        log::debug!("line {line_no}: dropping {text:?}, prefix {byte:#04x}");
        return Ok(Some(ParsedRow::Dropped {
            text,
            code,
            reason: DropReason::Prefixed(byte),
        }));
    }

    let [operand1, operand2, operand3] = match resolve_operands(operands) {
        Some(resolved) => resolved,
        None => return Err(GenError::UnsupportedOperand { line: line_no, text }),
    };

    Ok(Some(ParsedRow::Retained(InstructionRecord {
        result: value_type(result),
        operand1,
        operand2,
        operand3,
        memory,
        prefix,
        code,
        name,
        text,
        line: line_no,
    })))
}

/// Strip the closing parenthesis. Only whitespace or a `//` comment may follow it.
fn strip_wrapper(args: &str) -> Result<&str, String> {
    let close = args
        .rfind(')')
        .ok_or_else(|| "missing closing parenthesis".to_string())?;
    let trailing = args[close + 1..].trim();
    if !trailing.is_empty() && !trailing.starts_with("//") {
        return Err(format!("unexpected text after record: `{trailing}`"));
    }
    Ok(&args[..close])
}

fn parse_u8(field: &str) -> Option<u8> {
    if let Some(hex) = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
    {
        u8::from_str_radix(hex, 16).ok()
    } else {
        field.parse().ok()
    }
}

fn parse_name(field: &str) -> Result<String, String> {
    let valid = field
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(field.to_string())
    } else {
        Err(format!("invalid identifier column `{field}`"))
    }
}

fn parse_text(field: &str) -> Result<String, String> {
    match field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some("") => Err("empty mnemonic".to_string()),
        Some(text) => Ok(text.to_string()),
        None => Err(format!("mnemonic `{field}` is not a quoted string")),
    }
}

fn value_type(token: TypeToken) -> Option<ValueType> {
    match token {
        TypeToken::Value(ty) => Some(ty),
        TypeToken::Void | TypeToken::V128 => None,
    }
}

fn resolve_operands(tokens: [TypeToken; 3]) -> Option<[Option<ValueType>; 3]> {
    if tokens.contains(&TypeToken::V128) {
        return None;
    }
    Some(tokens.map(value_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "WABT_OPCODE";

    fn retained(line: &str) -> InstructionRecord {
        match parse_record(line, 1, MARKER) {
            Ok(Some(ParsedRow::Retained(record))) => record,
            other => panic!("expected retained record, got {other:?}"),
        }
    }

    fn malformed_reason(line: &str) -> String {
        match parse_record(line, 7, MARKER) {
            Err(GenError::MalformedRecord { line: 7, reason }) => reason,
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_short_layout() {
        let record = retained(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, "i32.add")"#);
        assert_eq!(record.result, Some(ValueType::I32));
        assert_eq!(record.operand1, Some(ValueType::I32));
        assert_eq!(record.operand2, None);
        assert_eq!(record.operand3, None);
        assert_eq!(record.memory, 0);
        assert_eq!(record.prefix, Prefix::None);
        assert_eq!(record.code, 0x6a);
        assert_eq!(record.name, None);
        assert_eq!(record.text, "i32.add");
    }

    #[test]
    fn test_wabt_layout() {
        let record =
            retained(r#"WABT_OPCODE(F64, I32, ___, ___, 8, 0, 0x2b, F64Load, "f64.load")"#);
        assert_eq!(record.result, Some(ValueType::F64));
        assert_eq!(record.memory, 8);
        assert_eq!(record.code, 0x2b);
        assert_eq!(record.name.as_deref(), Some("F64Load"));
        assert_eq!(record.text, "f64.load");
    }

    #[test]
    fn test_decimal_code_and_trailing_comment() {
        let record = retained(r#"WABT_OPCODE(___, ___, ___, ___, 0, 0, 1, "nop")  // no-op"#);
        assert_eq!(record.code, 1);
    }

    #[test]
    fn test_unrelated_lines_ignored() {
        for line in [
            "",
            "/* comment */",
            "#define WABT_OPCODE(...)",
            "  WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, \"nop\")",
            "WABT_OPCODES(___, ___, ___, ___, 0, 0, 0x01, \"nop\")",
        ] {
            assert_eq!(parse_record(line, 1, MARKER).unwrap(), None, "{line:?}");
        }
    }

    #[test]
    fn test_vector_result_dropped() {
        let row = parse_record(
            r#"WABT_OPCODE(V128, I32, ___, ___, 16, 0, 0x00, "v128.load")"#,
            1,
            MARKER,
        )
        .unwrap();
        assert!(matches!(
            row,
            Some(ParsedRow::Dropped { reason: DropReason::VectorResult, .. })
        ));
    }

    #[test]
    fn test_prefixed_dropped() {
        let row = parse_record(
            r#"WABT_OPCODE(I32, F32, ___, ___, 0, 0xfc, 0x00, "i32.trunc_sat_f32_s")"#,
            1,
            MARKER,
        )
        .unwrap();
        assert!(matches!(
            row,
            Some(ParsedRow::Dropped { reason: DropReason::Prefixed(0xfc), .. })
        ));
    }

    #[test]
    fn test_vector_operand_rejected() {
        let err = parse_record(
            r#"WABT_OPCODE(I32, V128, ___, ___, 0, 0, 0x10, "odd.op")"#,
            3,
            MARKER,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::UnsupportedOperand { line: 3, .. }));
    }

    #[test]
    fn test_too_few_fields() {
        let reason = malformed_reason(r#"WABT_OPCODE(I32, I32, ___, 0, 0, 0x6A, "i32.add")"#);
        assert!(reason.contains("at least 8"), "{reason}");
    }

    #[test]
    fn test_too_many_fields() {
        let reason =
            malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, A, B, "i32.add")"#);
        assert!(reason.contains("at most 9"), "{reason}");
    }

    #[test]
    fn test_missing_close_paren() {
        let reason = malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, "i32.add""#);
        assert!(reason.contains("closing parenthesis"), "{reason}");
    }

    #[test]
    fn test_trailing_garbage() {
        let reason =
            malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, "i32.add") junk"#);
        assert!(reason.contains("junk"), "{reason}");
    }

    #[test]
    fn test_stray_paren_inside_fields() {
        let reason =
            malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A), "i32.add")"#);
        assert!(reason.contains("opcode"), "{reason}");
    }

    #[test]
    fn test_bad_tokens() {
        let reason = malformed_reason(r#"WABT_OPCODE(I16, I32, ___, ___, 0, 0, 0x6A, "x")"#);
        assert!(reason.contains("I16"), "{reason}");

        let reason = malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x100, "x")"#);
        assert!(reason.contains("0x100"), "{reason}");

        let reason = malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, i32.add)"#);
        assert!(reason.contains("quoted"), "{reason}");

        let reason = malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, "")"#);
        assert!(reason.contains("empty"), "{reason}");

        let reason =
            malformed_reason(r#"WABT_OPCODE(I32, I32, ___, ___, 0, 0, 0x6A, 3d, "i32.add")"#);
        assert!(reason.contains("identifier"), "{reason}");
    }

    #[test]
    fn test_read_definitions_keeps_order_and_line_numbers() {
        let text = r#"
/* header */
WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x01, "nop")
WABT_OPCODE(V128, ___, ___, ___, 0, 0, 0x02, "v128.nothing")
WABT_OPCODE(I32, ___, ___, ___, 0, 0xfc, 0x03, "prefixed")
WABT_OPCODE(___, ___, ___, ___, 0, 0, 0x00, "unreachable")
"#;
        let records = read_definitions(text.lines(), MARKER).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(names, ["nop", "unreachable"]);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].line, 6);

        let rows = read_rows(text.lines(), MARKER).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_custom_marker() {
        let records =
            read_definitions([r#"OP(___, ___, ___, ___, 0, 0, 0x01, "nop")"#], "OP").unwrap();
        assert_eq!(records.len(), 1);
    }
}
