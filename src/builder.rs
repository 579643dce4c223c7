//! Data-construction helpers for building [`Grammar`] values.
//!
//! Parsing a grammar from its textual form is explicitly out of scope for
//! this crate (see the crate docs) — grammars are always supplied as data.
//! These functions are the in-language equivalent of writing that data out
//! by hand: they do not parse anything, and they do not check the resulting
//! grammar for well-formedness (e.g. dangling references, a sequence that
//! opens on a separator).

use std::rc::Rc;

use crate::error::ParseError;
use crate::rule::{AnchoredPattern, Grammar, Rule, SeqElem};

/// A rule that resolves `name` against the enclosing grammar at parse time.
pub fn reference(name: impl Into<String>) -> Rc<Rule> {
    Rc::new(Rule::Reference(name.into()))
}

/// A rule matching the literal substring `s`.
pub fn string(s: impl Into<String>) -> Rc<Rule> {
    Rc::new(Rule::String(s.into()))
}

/// A rule matching the single literal character `c`.
pub fn char_lit(c: char) -> Rc<Rule> {
    Rc::new(Rule::Char(c))
}

/// A rule matching `pattern`, anchored to the current position.
///
/// # Errors
///
/// Returns [`ParseError::InvalidPattern`] if `pattern` does not compile.
pub fn regex(pattern: &str) -> Result<Rc<Rule>, ParseError> {
    Ok(Rc::new(Rule::Regex(AnchoredPattern::new(pattern)?)))
}

/// Builds a `Sequence` rule from a list of alternatives, each itself an
/// ordered list of sub-rules. `sequence(vec![vec![a, b], vec![c]])` encodes
/// `(a b) | (c)`, tried left to right.
///
/// # Panics
///
/// Panics if `alternatives` is empty or any alternative is empty — an empty
/// sequence, or one whose first alternative is empty, would open on a
/// position with no live sub-rule, violating the engine's invariant that a
/// fresh `Sequence` step always starts at a real sub-rule.
pub fn sequence(alternatives: Vec<Vec<Rc<Rule>>>) -> Rc<Rule> {
    assert!(!alternatives.is_empty(), "a sequence needs at least one alternative");
    let mut elems = Vec::new();
    for (i, alternative) in alternatives.into_iter().enumerate() {
        assert!(!alternative.is_empty(), "an alternative needs at least one sub-rule");
        if i > 0 {
            elems.push(SeqElem::Separator);
        }
        elems.extend(alternative.into_iter().map(SeqElem::Rule));
    }
    Rc::new(Rule::Sequence(elems))
}

/// Accumulates named rules into a [`Grammar`].
#[derive(Default)]
pub struct GrammarBuilder {
    rules: Grammar,
}

impl GrammarBuilder {
    /// Starts an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `rule`, overwriting any prior binding for that name.
    pub fn rule(mut self, name: impl Into<String>, rule: Rc<Rule>) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Finishes the builder, yielding the assembled [`Grammar`].
    pub fn build(self) -> Grammar {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_interleaves_separators_between_alternatives() {
        let a = char_lit('a');
        let b = char_lit('b');
        let c = char_lit('c');
        let rule = sequence(vec![vec![Rc::clone(&a), Rc::clone(&b)], vec![Rc::clone(&c)]]);
        match &*rule {
            Rule::Sequence(elems) => {
                assert_eq!(elems.len(), 4);
                assert!(matches!(&elems[0], SeqElem::Rule(_)));
                assert!(matches!(&elems[1], SeqElem::Rule(_)));
                assert!(matches!(&elems[2], SeqElem::Separator));
                assert!(matches!(&elems[3], SeqElem::Rule(_)));
            }
            _ => panic!("expected a Sequence"),
        }
    }

    #[test]
    fn grammar_builder_collects_named_rules() {
        let grammar = GrammarBuilder::new()
            .rule("greet", string("hi"))
            .rule("quiet", char_lit('\0'))
            .build();
        assert_eq!(grammar.len(), 2);
        assert!(grammar.contains_key("greet"));
    }

    #[test]
    #[should_panic(expected = "at least one alternative")]
    fn sequence_rejects_empty_alternative_list() {
        sequence(vec![]);
    }
}
