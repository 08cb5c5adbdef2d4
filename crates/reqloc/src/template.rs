//! Message placeholder parser using winnow.
//!
//! Translated messages carry Python-style named placeholders: `%(name)s`,
//! `%(num)d`, with `%%` as the escape for a literal percent sign. Parsing
//! handles:
//! - Literal text segments
//! - Named placeholders with a single-letter conversion
//! - The `%%` escape
//! - Stray `%` characters (passed through unchanged)

use std::collections::HashMap;

use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::value::Value;

/// One piece of a parsed message.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text, emitted unchanged.
    Literal(String),
    /// A named placeholder such as `%(name)s`.
    Placeholder { name: String, conversion: char },
}

/// Substitute named placeholders in `message` from `vars`.
///
/// Substitution only happens when `vars` is non-empty; a message rendered
/// without arguments is returned byte-for-byte, escapes included. Placeholders
/// whose name is not present in `vars` are left verbatim so a partially
/// translated message degrades instead of breaking.
pub(crate) fn interpolate(message: &str, vars: &HashMap<String, Value>) -> String {
    if vars.is_empty() {
        return message.to_string();
    }

    let Some(segments) = parse_message(message) else {
        return message.to_string();
    };

    let mut out = String::with_capacity(message.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Placeholder { name, conversion } => match vars.get(&name) {
                Some(value) => out.push_str(&render_value(value, conversion)),
                None => {
                    out.push_str("%(");
                    out.push_str(&name);
                    out.push(')');
                    out.push(conversion);
                }
            },
        }
    }
    out
}

/// Render one value under a conversion letter.
///
/// Only the conversions that matter for message catalogs are distinguished:
/// `d`/`i` render as integers, `f` as a fixed-precision float, everything
/// else falls back to the value's display form.
fn render_value(value: &Value, conversion: char) -> String {
    match conversion {
        'd' | 'i' => match value {
            Value::Number(n) => n.to_string(),
            Value::Float(f) => (*f as i64).to_string(),
            Value::String(s) => s.clone(),
        },
        'f' => match value.as_float() {
            Some(f) => format!("{f:.6}"),
            None => value.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Parse a message into segments. Returns `None` when the input is not fully
/// consumed, which the fallback alternatives should make impossible.
fn parse_message(input: &str) -> Option<Vec<Segment>> {
    let mut remaining = input;
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(&mut remaining).ok()?;

    remaining.is_empty().then(|| merge_literals(segments))
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            placeholder => result.push(placeholder),
        }
    }

    result
}

/// Parse one segment: escape, placeholder, literal run, or a stray percent.
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escaped_percent, placeholder, literal, stray_percent)).parse_next(input)
}

/// `%%` renders as a single percent sign.
fn escaped_percent(input: &mut &str) -> ModalResult<Segment> {
    "%%".map(|_| Segment::Literal("%".to_string()))
        .parse_next(input)
}

/// `%(name)X` where X is a single conversion letter.
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    let name = preceded(
        '%',
        delimited(
            '(',
            take_while(1.., |c: char| c != ')' && c != '%'),
            ')',
        ),
    )
    .parse_next(input)?;
    let conversion = one_of(('a'..='z', 'A'..='Z')).parse_next(input)?;

    Ok(Segment::Placeholder {
        name: name.to_string(),
        conversion,
    })
}

/// A run of anything that is not a percent sign.
fn literal(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '%')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// A `%` that starts neither an escape nor a placeholder passes through.
fn stray_percent(input: &mut &str) -> ModalResult<Segment> {
    '%'.map(|_| Segment::Literal("%".to_string()))
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars;

    #[test]
    fn substitutes_named_placeholders() {
        let out = interpolate("Hello %(name)s!", &vars! { "name" => "World" });
        assert_eq!(out, "Hello World!");
    }

    #[test]
    fn integer_conversion_renders_numbers() {
        let out = interpolate("%(num)d items", &vars! { "num" => 3 });
        assert_eq!(out, "3 items");
    }

    #[test]
    fn unknown_placeholder_left_verbatim() {
        let out = interpolate("%(missing)s here", &vars! { "other" => 1 });
        assert_eq!(out, "%(missing)s here");
    }

    #[test]
    fn escaped_percent_collapses_with_vars() {
        let out = interpolate("100%% of %(what)s", &vars! { "what" => "it" });
        assert_eq!(out, "100% of it");
    }

    #[test]
    fn empty_vars_leave_message_untouched() {
        let out = interpolate("100%% of %(what)s", &vars! {});
        assert_eq!(out, "100%% of %(what)s");
    }

    #[test]
    fn stray_percent_passes_through() {
        let out = interpolate("50% off %(item)s", &vars! { "item" => "hats" });
        assert_eq!(out, "50% off hats");
    }
}
