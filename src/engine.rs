//! The `advance` / `forward` / `backward` transition, the heart of the engine.
//!
//! This replaces a recursive-descent parser with an explicit interpreter
//! loop over a reified stack of [`Step`]s: `advance` dispatches on the top
//! frame, `forward` climbs the stack after a terminal matches, and
//! `backward` climbs it after one fails, looking for a live alternative.

use std::rc::Rc;

use tracing::trace;

use crate::error::ParseError;
use crate::rule::{Rule, SeqElem};
use crate::state::State;
use crate::step::Step;

impl State {
    /// Performs one unit of parsing progress.
    ///
    /// Checks the top step against the memo cache first (regardless of its
    /// rule kind); failing that, dispatches on the rule kind: `Sequence` and
    /// `Reference` push a child frame, `Regex`/`String`/`Char` attempt a
    /// terminal match and call [`forward`](State::forward) or
    /// [`backward`](State::backward) accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::AlreadyDone`] if called after [`is_done`](State::is_done)
    /// is already true, and [`ParseError::UnknownRule`] if a `Reference` names
    /// a rule absent from the grammar.
    pub fn advance(&mut self) -> Result<(), ParseError> {
        if self.done {
            return Err(ParseError::AlreadyDone);
        }

        let memo_hit = {
            let top = self
                .steps
                .last()
                .expect("steps is non-empty during an in-progress parse");
            self.memo.get(top).cloned()
        };
        if let Some(continuation) = memo_hit {
            let end_pos = continuation
                .last()
                .and_then(|step| step.end_pos)
                .expect("a memoized continuation is never empty and ends on a completed step");
            trace!(pos = end_pos, resumed = continuation.len(), "memo hit");
            self.steps.extend(continuation);
            self.climb(end_pos);
            return Ok(());
        }

        let top = self
            .steps
            .last()
            .expect("steps is non-empty during an in-progress parse");
        let rule = Rc::clone(&top.rule);
        let pos = top.pos;

        match &*rule {
            Rule::Sequence(elems) => {
                let first = match elems.first() {
                    Some(SeqElem::Rule(r)) => Rc::clone(r),
                    _ => unreachable!("a sequence must not start with the alternative separator"),
                };
                trace!(pos, "advance: sequence, entering first alternative");
                self.steps.push(Step::new(first, pos));
            }
            Rule::Reference(name) => match self.grammar.get(name.as_str()) {
                Some(target) => {
                    trace!(pos, rule = %name, "advance: reference, descending");
                    self.steps.push(Step::new(Rc::clone(target), pos));
                }
                None => return Err(ParseError::UnknownRule(name.clone())),
            },
            Rule::Regex(pattern) => match pattern.find_at(&self.input, pos) {
                Some(matched) => {
                    let text = matched.to_string();
                    self.forward(Some(text));
                }
                None => self.backward(format!("Expected match of {}", pattern.source())),
            },
            Rule::String(literal) => {
                if self.input[pos..].starts_with(literal.as_str()) {
                    self.forward(Some(literal.clone()));
                } else {
                    self.backward(format!("Expected string '{literal}'"));
                }
            }
            Rule::Char(expected) => {
                if self.input[pos..].chars().next() == Some(*expected) {
                    self.forward(Some(expected.to_string()));
                } else {
                    self.backward(format!("Expected character '{expected}'"));
                }
            }
        }

        Ok(())
    }

    /// Marks the top step matched with `value`, then climbs the stack via
    /// [`climb`](State::climb).
    pub(crate) fn forward(&mut self, value: Option<String>) {
        let new_pos = {
            let top = self.steps.last_mut().expect("checked by caller");
            let start = top.pos;
            let advanced = value.as_ref().map_or(start, |v| start + v.len());
            top.value = value;
            advanced
        };
        self.climb(new_pos);
    }

    /// Climbs the step stack from the top given that matching has reached
    /// `new_pos`: closes out frames that have nothing left to do until it
    /// finds a `Sequence` frame with a live next sub-rule (pushes a child
    /// for it) or runs off the bottom (finishes the whole parse). Shared by
    /// [`forward`](State::forward), which climbs after a fresh terminal
    /// match, and the memo hit in [`advance`](State::advance), which climbs
    /// after resurrecting an already-done subtree with no match to run.
    fn climb(&mut self, new_pos: usize) {
        let mut idx = self.steps.len();
        loop {
            if idx == 0 {
                if new_pos == self.input.len() {
                    trace!(pos = new_pos, "forward: parse succeeded");
                    self.errors.clear();
                    self.done = true;
                } else {
                    self.backward("Expected EOF".to_string());
                }
                return;
            }
            idx -= 1;

            let next = {
                let step = &self.steps[idx];
                match &*step.rule {
                    Rule::Sequence(elems) => {
                        let cur = step.rule_index.expect("sequence step carries an index");
                        match elems.get(cur + 1) {
                            Some(SeqElem::Rule(r)) => Some((cur + 1, Rc::clone(r))),
                            _ => None,
                        }
                    }
                    _ => None,
                }
            };

            if let Some((next_index, sub_rule)) = next {
                self.steps[idx].rule_index = Some(next_index);
                self.steps.push(Step::new(sub_rule, new_pos));
                return;
            }

            if self.steps[idx].end_pos.is_none() {
                self.steps[idx].end_pos = Some(new_pos);
            }
        }
    }

    /// Records `message` as an expectation at the top step's position, then
    /// climbs the stack collecting completed frames into `pack` until it
    /// finds a not-yet-done `Sequence` frame with a live separator ahead of
    /// its current index (switches to that alternative, memoizing each
    /// `pack[i]` against the run of later `pack` entries that stays inside
    /// its own `[pos, end_pos)` span) or runs off the bottom (the whole
    /// parse fails).
    pub(crate) fn backward(&mut self, message: String) {
        let fail_pos = self.steps.last().expect("checked by caller").pos;
        if self.errors_pos != Some(fail_pos) {
            self.errors.clear();
            self.errors_pos = Some(fail_pos);
        }
        self.errors.insert(message);

        let mut pack: Vec<Step> = Vec::new();
        let mut idx = self.steps.len();
        while idx > 0 {
            idx -= 1;

            if self.steps[idx].end_pos.is_some() {
                pack.insert(0, self.steps[idx].clone());
                continue;
            }

            let separator_offset = match &*self.steps[idx].rule {
                Rule::Sequence(elems) => {
                    let cur = self.steps[idx].rule_index.expect("sequence step carries an index");
                    elems[cur..].iter().position(|e| matches!(e, SeqElem::Separator))
                }
                _ => None,
            };

            if let Some(k) = separator_offset {
                let cur = self.steps[idx].rule_index.expect("checked above");
                self.steps[idx].rule_index = Some(cur + k);
                self.steps.truncate(idx + 1);

                for i in 0..pack.len() {
                    let key = &pack[i];
                    let Some(key_end) = key.end_pos else { continue };
                    let mut tail = Vec::new();
                    for later in &pack[i + 1..] {
                        if later.pos >= key.pos && later.end_pos.is_some_and(|e| e <= key_end) {
                            tail.push(later.clone());
                        } else {
                            break;
                        }
                    }
                    if !tail.is_empty() {
                        self.memo.insert(key.clone(), tail);
                    }
                }

                trace!(pos = fail_pos, "backward: switching to next alternative");
                self.forward(None);
                return;
            }
        }

        trace!(pos = fail_pos, "backward: no live alternative remains, parse failed");
        self.done = true;
    }

    /// Drives [`advance`](State::advance) to completion, then clears the
    /// memo cache — the convenience wrapper described by the engine's
    /// language-neutral `parse` operation.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        while !self.done {
            self.advance()?;
        }
        self.memo.clear();
        Ok(())
    }
}
