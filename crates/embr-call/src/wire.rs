//! Wire-level grammar shared with the engine-side emitter.

use crate::CallInfo;
use serde_json::Value;

/// Token separator of the call grammar.
///
/// Fixed by the emitter contract; tokens never contain it.
pub const DELIMITER: char = ':';

/// Tokenizes a raw string into a [`CallInfo`].
///
/// `split` always yields at least one token, so the operation slot is
/// filled even for degenerate input.
pub(crate) fn parse(raw: &str) -> CallInfo {
    let mut tokens = raw.split(DELIMITER).map(str::to_owned);
    let operation = tokens.next().unwrap_or_default();
    CallInfo::new(operation, tokens.collect())
}

/// Joins operation and arguments back into wire form.
pub(crate) fn to_wire(operation: &str, args: &[String]) -> String {
    let mut out = String::from(operation);
    for arg in args {
        out.push(DELIMITER);
        out.push_str(arg);
    }
    out
}

/// Renders a call result as JSON text.
///
/// Used where only primitive data crosses back to the engine side:
/// trace output and debug display. The structured [`Value`] itself is
/// handed over by move wherever the boundary allows it.
///
/// # Example
///
/// ```
/// use embr_call::encode_result;
/// use serde_json::json;
///
/// assert_eq!(encode_result(&json!(null)), "null");
/// assert_eq!(encode_result(&json!({"hp": 20})), r#"{"hp":20}"#);
/// ```
#[must_use]
pub fn encode_result(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_result_is_compact_json() {
        assert_eq!(encode_result(&json!(true)), "true");
        assert_eq!(encode_result(&json!("ok")), "\"ok\"");
        assert_eq!(encode_result(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn to_wire_joins_with_delimiter() {
        assert_eq!(to_wire("op", &[]), "op");
        assert_eq!(to_wire("op", &["a".into(), "b".into()]), "op:a:b");
    }
}
