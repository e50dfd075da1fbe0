//! Splitting of descriptor strings that contain bracketed groups, such as
//! `"tod[0:100],map(1,2),plain"`.

/// Bracket pairs recognized by [`split_outside`].
pub const DEFAULT_GROUPS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

/// A piece of a string cut by [`split_by_group`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside of any group.
    Plain(&'a str),
    /// A group from its opening character up to and including the matching
    /// closing one, or to the end of the string if it is never closed.
    Group(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Plain(s) | Segment::Group(s) => s,
        }
    }
}

/// Splits `text` into alternating plain and group segments.
///
/// A group opens with the opening character of one of `groups` and closes
/// when that same kind of bracket is balanced again; other bracket kinds
/// inside it are not tracked. Empty segments are not returned.
///
/// ```
/// use lambda_tools::strings::{DEFAULT_GROUPS, Segment, split_by_group};
///
/// assert_eq!(
///     split_by_group("a(b(c))d[e]", DEFAULT_GROUPS),
///     vec![
///         Segment::Plain("a"),
///         Segment::Group("(b(c))"),
///         Segment::Plain("d"),
///         Segment::Group("[e]"),
///     ]
/// );
/// ```
pub fn split_by_group<'a>(text: &'a str, groups: &[(char, char)]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut seg_start = 0;
    // Open bracket pair and nesting depth of the current group.
    let mut open: Option<((char, char), usize)> = None;

    for (pos, c) in text.char_indices() {
        match &mut open {
            None => {
                if let Some(&pair) = groups.iter().find(|(start, _)| *start == c) {
                    if pos > seg_start {
                        segments.push(Segment::Plain(&text[seg_start..pos]));
                    }
                    seg_start = pos;
                    open = Some((pair, 1));
                }
            }
            Some(((start, end), depth)) => {
                if c == *start {
                    *depth += 1;
                } else if c == *end {
                    *depth -= 1;
                    if *depth == 0 {
                        let next = pos + c.len_utf8();
                        segments.push(Segment::Group(&text[seg_start..next]));
                        seg_start = next;
                        open = None;
                    }
                }
            }
        }
    }

    if seg_start < text.len() {
        let rest = &text[seg_start..];
        segments.push(match open {
            Some(_) => Segment::Group(rest),
            None => Segment::Plain(rest),
        });
    }
    segments
}

/// Splits `text` at every `sep` that is not inside a `()`, `[]` or `{}`
/// group.
///
/// ```
/// use lambda_tools::strings::split_outside;
///
/// assert_eq!(
///     split_outside("a,(b,c),[d,(e,f)],g", ","),
///     vec!["a", "(b,c)", "[d,(e,f)]", "g"]
/// );
/// ```
pub fn split_outside(text: &str, sep: &str) -> Vec<String> {
    split_outside_with(text, sep, DEFAULT_GROUPS)
}

/// [`split_outside`] with a custom set of bracket pairs.
///
/// Like [`str::split`], a separator at either end produces an empty piece,
/// and an empty `text` produces a single empty piece.
pub fn split_outside_with(text: &str, sep: &str, groups: &[(char, char)]) -> Vec<String> {
    let mut pieces = vec![String::new()];
    for segment in split_by_group(text, groups) {
        match segment {
            Segment::Group(group) => {
                if let Some(last) = pieces.last_mut() {
                    last.push_str(group);
                }
            }
            Segment::Plain(plain) => {
                let mut tokens = plain.split(sep);
                if let (Some(first), Some(last)) = (tokens.next(), pieces.last_mut()) {
                    last.push_str(first);
                }
                pieces.extend(tokens.map(str::to_string));
            }
        }
    }
    pieces
}
