//! Opt-in runtime checks. `php_syntax` reads the outcome of the external
//! syntax checker from the context; the rest are textual heuristics.

use super::{Advice, Check, Rule, RuleContext};
use crate::syntax::SyntaxOutcome;

fn syntax_valid(ctx: &RuleContext<'_>) -> bool {
    matches!(ctx.syntax, Some(SyntaxOutcome::Valid))
}

fn syntax_advice(ctx: &RuleContext<'_>) -> String {
    match ctx.syntax {
        Some(SyntaxOutcome::Invalid { message }) if !message.is_empty() => {
            format!("PHP syntax check failed: {message}")
        }
        Some(SyntaxOutcome::Unavailable { reason }) => {
            format!("PHP syntax check could not run: {reason}")
        }
        Some(SyntaxOutcome::TimedOut { after }) => {
            format!("PHP syntax check timed out after {}s", after.as_secs())
        }
        Some(SyntaxOutcome::Invalid { .. } | SyntaxOutcome::Valid) => {
            "PHP syntax check failed".to_string()
        }
        None => "PHP syntax check was not performed".to_string(),
    }
}

fn runtime_issue(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.has_runtime_issue(ctx.text())
}

fn output_before_headers(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.has_output_before_headers(ctx.text())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::present(
            "php_syntax",
            "PHP syntax is valid (no parse errors)",
            Check::Probe(syntax_valid),
        )
        .with_advice(Advice::Computed(syntax_advice)),
        Rule::absent(
            "runtime_safety",
            "No obvious runtime issues detected",
            Check::Probe(runtime_issue),
        ),
        Rule::present(
            "error_handling",
            "Proper error handling implemented",
            Check::ContainsAny(&[
                "try {",
                "catch",
                "error_reporting",
                "ini_set",
                "set_error_handler",
            ]),
        ),
        Rule::absent(
            "output_order",
            "No output before headers (prevents JSON parse errors)",
            Check::Probe(output_before_headers),
        ),
    ]
}
