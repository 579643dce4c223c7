//! [`Step`]: one frame of the reified parse stack.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use by_address::ByAddress;

use crate::rule::Rule;

/// One frame of the reified parse stack.
///
/// A `Step` tracks which rule it represents, where it started, and — once
/// matching completes — where it ended and (for terminals) what text it
/// captured. Two Steps are [equal](Step::eq) when their `rule` pointer and
/// `pos` agree; `rule_index`, `end_pos`, and `value` never participate in
/// identity, which is exactly the key the packrat cache memoizes on.
#[derive(Debug, Clone)]
pub struct Step {
    /// The rule this frame represents. Immutable for the frame's lifetime.
    pub rule: Rc<Rule>,
    /// Starting input offset when this frame was opened.
    pub pos: usize,
    /// For `Sequence` rules, the index into the sequence list currently being
    /// matched. `None` for every other rule kind.
    pub rule_index: Option<usize>,
    /// The exclusive offset at which this frame completed matching.
    /// `None` means "not yet done".
    pub end_pos: Option<usize>,
    /// The captured substring, for a terminal rule that has matched.
    pub value: Option<String>,
}

impl Step {
    /// Opens a new frame for `rule` at `pos`. `Sequence`-ruled frames start
    /// at alternative index 0; every other kind carries no sequence index.
    pub fn new(rule: Rc<Rule>, pos: usize) -> Self {
        let rule_index = matches!(&*rule, Rule::Sequence(_)).then_some(0);
        Self {
            rule,
            pos,
            rule_index,
            end_pos: None,
            value: None,
        }
    }

    /// Whether this frame has finished matching.
    pub fn is_done(&self) -> bool {
        self.end_pos.is_some()
    }

    fn identity(&self) -> (ByAddress<Rc<Rule>>, usize) {
        (ByAddress(Rc::clone(&self.rule)), self.pos)
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Step {}

impl Hash for Step {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::SeqElem;

    #[test]
    fn identity_ignores_mutable_fields() {
        let rule = Rc::new(Rule::String("hi".to_string()));
        let mut a = Step::new(Rc::clone(&rule), 3);
        let b = Step::new(Rc::clone(&rule), 3);
        a.end_pos = Some(5);
        a.value = Some("hi".to_string());
        assert_eq!(a, b, "end_pos/value must not affect identity");

        let different_pos = Step::new(rule, 4);
        assert_ne!(a, different_pos);
    }

    #[test]
    fn identity_distinguishes_equal_looking_rules_by_address() {
        let a = Rc::new(Rule::String("hi".to_string()));
        let b = Rc::new(Rule::String("hi".to_string()));
        assert_ne!(
            Step::new(a, 0),
            Step::new(b, 0),
            "distinct Rc allocations are distinct identities even with equal contents"
        );
    }

    #[test]
    fn sequence_steps_start_at_alternative_zero() {
        let rule = Rc::new(Rule::Sequence(vec![SeqElem::Rule(Rc::new(Rule::Char('a')))]));
        let step = Step::new(rule, 0);
        assert_eq!(step.rule_index, Some(0));
    }

    #[test]
    fn non_sequence_steps_carry_no_rule_index() {
        let step = Step::new(Rc::new(Rule::Char('a')), 0);
        assert_eq!(step.rule_index, None);
    }
}
