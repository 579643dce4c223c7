use steprat::builder::{char_lit, reference, regex, string, sequence, GrammarBuilder};
use steprat::State;

/// A small arithmetic grammar, built as data rather than parsed from a
/// textual notation (see the crate docs for why). `PlusMinusTail` and
/// `MultDivTail` encode the `(op atom)*` repetition the original textual
/// grammar wrote with a Kleene star: a tail either continues with one more
/// operator/operand pair and recurses, or matches the empty string.
fn arithmetic_grammar() -> steprat::Grammar {
    GrammarBuilder::new()
        .rule(
            "PlusMinusExpr",
            sequence(vec![vec![reference("MultDivExpr"), reference("PlusMinusTail")]]),
        )
        .rule(
            "PlusMinusTail",
            sequence(vec![
                vec![regex(r"[+\-]").unwrap(), reference("MultDivExpr"), reference("PlusMinusTail")],
                vec![string("")],
            ]),
        )
        .rule(
            "MultDivExpr",
            sequence(vec![vec![reference("AtomicExpr"), reference("MultDivTail")]]),
        )
        .rule(
            "MultDivTail",
            sequence(vec![
                vec![regex(r"[*/]").unwrap(), reference("AtomicExpr"), reference("MultDivTail")],
                vec![string("")],
            ]),
        )
        .rule(
            "AtomicExpr",
            sequence(vec![vec![
                reference("OptWhitespace"),
                reference("AtomicInner"),
                reference("OptWhitespace"),
            ]]),
        )
        .rule(
            "AtomicInner",
            sequence(vec![
                vec![reference("Literal")],
                vec![char_lit('('), reference("PlusMinusExpr"), char_lit(')')],
            ]),
        )
        .rule(
            "Literal",
            sequence(vec![
                vec![char_lit('a')],
                vec![char_lit('b')],
                vec![char_lit('c')],
                vec![char_lit('d')],
            ]),
        )
        .rule("OptWhitespace", regex(r" *").unwrap())
        .build()
}

fn main() {
    tracing_subscriber::fmt::init();

    let grammar = arithmetic_grammar();
    let input = "   ( a + b)*( c +   a  *  (  d )+ c  )".to_string();
    let mut state = State::new(grammar, "PlusMinusExpr", input);

    state.parse().expect("grammar references no unknown rule");

    let (errors, errors_pos) = state.errors();
    if errors.is_empty() {
        println!("parsed {} steps", state.steps().len());
        for step in state.steps() {
            if let Some(value) = &step.value {
                if !value.is_empty() {
                    println!("  {value:?} @ {}", step.pos);
                }
            }
        }
    } else {
        let pos = errors_pos.unwrap_or(0);
        let (line, column) = state.pos_to_line_column(pos);
        println!("parse failed at {line}:{column}: {errors:?}");
    }
}
