//! Incremental reparse: splicing an edit into `input` and reusing the
//! unaffected parts of the prior parse via the memo cache.

use std::rc::Rc;

use tracing::trace;

use crate::rule::Rule;
use crate::state::State;
use crate::step::Step;

impl State {
    /// Replaces `input[at..at+length)` with `replacement`, then prepares the
    /// state for a fresh `advance` loop that reuses unaffected subtrees of
    /// the prior parse.
    ///
    /// Steps that lie entirely before the edit are kept as-is. Steps that
    /// lie entirely after it are shifted by `replacement.len() - length`.
    /// Steps that intersect the edited region are discarded. From whatever
    /// survives, a fresh memo cache is built keyed on `Reference`-ruled
    /// steps, so the next `advance` loop can resurrect undisturbed
    /// subtrees in one step each instead of re-parsing them.
    pub fn increment(&mut self, replacement: &str, at: usize, length: usize) {
        self.input.replace_range(at..at + length, replacement);
        let shift = replacement.len() as isize - length as isize;

        let prior = std::mem::take(&mut self.steps);
        let mut surviving = Vec::with_capacity(prior.len());
        for mut step in prior {
            if step.pos > at + length {
                step.pos = shift_by(step.pos, shift);
                if let Some(end) = step.end_pos {
                    step.end_pos = Some(shift_by(end, shift));
                }
                surviving.push(step);
            } else if step.end_pos.is_some_and(|end| end <= at) {
                surviving.push(step);
            }
            // Otherwise the step intersects the edited region: discard it.
        }

        trace!(
            at,
            length,
            replacement_len = replacement.len(),
            surviving = surviving.len(),
            "increment: rebuilding memo from surviving steps"
        );

        self.memo.clear();
        for (i, step) in surviving.iter().enumerate() {
            if !matches!(&*step.rule, Rule::Reference(_)) {
                continue;
            }
            let Some(end) = step.end_pos else { continue };

            let mut tail = Vec::new();
            for later in &surviving[i + 1..] {
                if later.pos >= step.pos && later.end_pos.is_some_and(|e| e <= end) {
                    tail.push(later.clone());
                } else {
                    break;
                }
            }
            if !tail.is_empty() {
                self.memo.insert(step.clone(), tail);
            }
        }

        let root = Step::new(Rc::new(Rule::Reference(self.start.clone())), 0);
        self.steps = vec![root];
        self.errors.clear();
        self.errors_pos = None;
        *self.line_offsets.borrow_mut() = None;
        self.done = false;
    }
}

fn shift_by(pos: usize, shift: isize) -> usize {
    (pos as isize + shift) as usize
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::builder::{reference, regex, sequence};
    use crate::rule::Grammar;
    use crate::state::State;

    fn arithmetic_grammar() -> Grammar {
        let mut grammar = Grammar::new();
        grammar.insert(
            "sum".to_string(),
            sequence(vec![
                vec![
                    reference("number"),
                    reference("op"),
                    reference("sum"),
                ],
                vec![reference("number")],
            ]),
        );
        grammar.insert("op".to_string(), regex(r"\+|-").unwrap());
        grammar.insert("number".to_string(), regex(r"\d+").unwrap());
        grammar
    }

    #[test]
    fn increment_shifts_and_preserves_steps_outside_the_edit() {
        let mut state = State::new(arithmetic_grammar(), "sum", "40+2");
        state.parse().unwrap();
        assert!(state.errors().0.is_empty());

        state.increment("-", 2, 1);
        assert_eq!(state.input(), "40-2");
        assert!(!state.is_done());

        state.parse().unwrap();
        assert!(state.is_done());
        assert!(state.errors().0.is_empty(), "40-2 should still parse cleanly");
    }

    #[test]
    fn increment_resets_driver_bookkeeping() {
        let mut state = State::new(arithmetic_grammar(), "sum", "40+2");
        state.parse().unwrap();
        state.increment("7", 3, 1);
        assert_eq!(state.steps().len(), 1, "reset to a single root frame");
        assert_eq!(state.errors().1, None);
    }
}
