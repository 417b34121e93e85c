//! # Vector Line Parsing
//!
//! Lines are whitespace-separated:
//! ```terminaloutput
//! {TOKEN} {V1} {V2} ... {VD}
//! ```

use crate::{
    errors::{WTResult, WordtableError},
    reader::RawLine,
    types::Vector,
};

fn parse_error(
    line: &RawLine,
    token: &str,
    message: impl Into<String>,
) -> WordtableError {
    WordtableError::Parse {
        line: line.line,
        token: token.to_string(),
        message: message.into(),
    }
}

/// Parse the token field of a line, ignoring any vector fields.
pub fn parse_token_field(line: &RawLine) -> WTResult<String> {
    line.text
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| parse_error(line, "", "missing token"))
}

/// Parse a ``{TOKEN} {V1} ... {VD}`` line into its token and vector.
pub fn parse_vector_line(line: &RawLine) -> WTResult<(String, Vector)> {
    let mut fields = line.text.split_whitespace();
    let token = fields
        .next()
        .ok_or_else(|| parse_error(line, "", "missing token"))?;

    let vector = fields
        .map(|field| match field.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(parse_error(
                line,
                token,
                format!("non-finite vector component {field:?}"),
            )),
            Err(e) => Err(parse_error(
                line,
                token,
                format!("invalid vector component {field:?}: {e}"),
            )),
        })
        .collect::<WTResult<Vector>>()?;

    if vector.is_empty() {
        return Err(parse_error(line, token, "no vector components"));
    }

    Ok((token.to_string(), vector))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawLine {
        RawLine {
            line: 7,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_vector_line() {
        let (token, vector) = parse_vector_line(&raw("the 0.1 -0.2\t3e-1")).unwrap();
        assert_eq!(token, "the");
        assert_eq!(vector, vec![0.1, -0.2, 0.3]);

        // Non-ascii tokens are fine.
        let (token, _) = parse_vector_line(&raw("的 1 2")).unwrap();
        assert_eq!(token, "的");
    }

    #[test]
    fn test_parse_errors() {
        match parse_vector_line(&raw("token_only")) {
            Err(WordtableError::Parse {
                line,
                token,
                message,
            }) => {
                assert_eq!(line, 7);
                assert_eq!(token, "token_only");
                assert_eq!(message, "no vector components");
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            parse_vector_line(&raw("cat 0.1 abc")),
            Err(WordtableError::Parse { .. })
        ));
        for text in ["a inf NaN", "a 0.1 -inf", "a nan", "a 1e39"] {
            match parse_vector_line(&raw(text)) {
                Err(WordtableError::Parse { token, message, .. }) => {
                    assert_eq!(token, "a");
                    assert!(message.starts_with("non-finite"), "{message}");
                }
                other => panic!("{text:?} parsed: {other:?}"),
            }
        }

        assert!(matches!(
            parse_vector_line(&raw("   ")),
            Err(WordtableError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_token_field() {
        assert_eq!(parse_token_field(&raw("a 0.1 0.2")).unwrap(), "a");
        assert_eq!(parse_token_field(&raw("字")).unwrap(), "字");
        assert!(parse_token_field(&raw("")).is_err());
    }
}
