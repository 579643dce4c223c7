//! An iterative, stack-free packrat parsing engine driven by a
//! data-described grammar.
//!
//! A [`Grammar`] maps rule names to [`Rule`] values — sequences with
//! prioritized alternatives, rule references, and three kinds of terminal
//! (regex, string literal, character literal). Feeding a grammar, a start
//! rule, and an input string to [`State::new`] produces a [`State`]; driving
//! it with repeated [`State::advance`] calls (or the [`State::parse`]
//! convenience loop) either runs it to completion with a full [`Step`]
//! trace, or to a `done` state carrying the furthest-reached expectation
//! errors.
//!
//! This crate implements only the engine itself. Three things sit outside
//! it, by design: parsing a grammar from a textual notation, shaping the
//! flat step trace into a nested AST, and translating a rule-name graph
//! from host-language symbols. Grammars here are always built as plain data
//! — see the [`builder`] module — not parsed from text.
//!
//! # Incremental reparsing
//!
//! [`State::increment`] splices an edit into the input and invalidates only
//! the steps that touch the edited region; unaffected subtrees are replayed
//! from the packrat cache on the next `advance` loop instead of being
//! re-parsed from scratch.
//!
//! # Example
//!
//! ```
//! use steprat::builder::{reference, regex, sequence, GrammarBuilder};
//! use steprat::State;
//!
//! let grammar = GrammarBuilder::new()
//!     .rule(
//!         "sum",
//!         sequence(vec![
//!             vec![reference("number"), reference("op"), reference("sum")],
//!             vec![reference("number")],
//!         ]),
//!     )
//!     .rule("op", regex(r"\+|-").unwrap())
//!     .rule("number", regex(r"\d+").unwrap())
//!     .build();
//!
//! let mut state = State::new(grammar, "sum", "40+2-7");
//! state.parse().unwrap();
//! assert!(state.is_done());
//! assert!(state.errors().0.is_empty());
//! ```

pub mod builder;
mod engine;
pub mod error;
mod incremental;
mod position;
pub mod rule;
pub mod state;
pub mod step;

pub use error::ParseError;
pub use rule::{Grammar, Rule, SeqElem};
pub use state::State;
pub use step::Step;
