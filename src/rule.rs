//! The grammar data model: [`Rule`], its sequence encoding, and the [`Grammar`] mapping.

use std::collections::HashMap;
use std::rc::Rc;

use regex::Regex;

use crate::error::ParseError;

/// A mapping from rule name to [`Rule`]. Keys are unique; order is irrelevant.
pub type Grammar = HashMap<String, Rc<Rule>>;

/// One element of a [`Rule::Sequence`]'s list: either a real sub-rule or the
/// alternative separator that partitions the list into left-to-right branches.
#[derive(Debug, Clone)]
pub enum SeqElem {
    /// A sub-rule belonging to the current alternative.
    Rule(Rc<Rule>),
    /// Marks the boundary between one alternative and the next.
    Separator,
}

/// A grammar construct describing how to match a fragment of input.
///
/// `Sequence` encodes both concatenation and prioritized choice: its element
/// list is interleaved with [`SeqElem::Separator`] markers that partition it
/// into alternatives, tried strictly left to right. `[A, B, SEP, C]` is the
/// two alternatives `(A B)` and `(C)`.
#[derive(Debug)]
pub enum Rule {
    /// Ordered alternatives, each itself a sequence of sub-rules.
    Sequence(Vec<SeqElem>),
    /// A symbolic name resolved against the enclosing [`Grammar`] at parse time.
    Reference(String),
    /// A regular expression, anchored to match only at the current position.
    Regex(AnchoredPattern),
    /// A literal substring.
    String(String),
    /// A single literal character.
    Char(char),
}

/// A regex pattern pre-anchored to the start of whatever haystack it searches.
///
/// The engine never searches forward for a match; it only asks "does this
/// pattern match *here*". Wrapping the caller's pattern in a non-capturing
/// `\A(?:...)` group once, at construction time, means every later match
/// attempt is a plain [`Regex::find`] against `&input[pos..]` with no special
/// casing at the call site.
#[derive(Debug)]
pub struct AnchoredPattern {
    source: String,
    anchored: Regex,
}

impl AnchoredPattern {
    /// Compiles `pattern`, anchoring it to the start of the search text.
    pub fn new(pattern: &str) -> Result<Self, ParseError> {
        let anchored = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|err| {
            ParseError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// The original, unanchored pattern text, for error messages.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the matched text if the pattern matches at the start of
    /// `haystack[pos..]`, or `None` otherwise.
    pub fn find_at<'a>(&self, haystack: &'a str, pos: usize) -> Option<&'a str> {
        self.anchored.find(&haystack[pos..]).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_pattern_only_matches_at_the_given_offset() {
        let digits = AnchoredPattern::new(r"\d+").unwrap();
        assert_eq!(digits.find_at("40+2", 0), Some("40"));
        assert_eq!(digits.find_at("40+2", 3), Some("2"));
        assert_eq!(digits.find_at("40+2", 2), None, "'+' is not a digit");
    }

    #[test]
    fn anchored_pattern_rejects_invalid_syntax() {
        assert!(AnchoredPattern::new("(unclosed").is_err());
    }
}
