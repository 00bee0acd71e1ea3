//! Textual security heuristics. They match patterns, not data flow, so
//! comments and string literals count too.

use super::{Advice, Check, Rule, RuleContext};

fn dangerous_calls(ctx: &RuleContext<'_>) -> bool {
    !ctx.primitives.dangerous_calls(ctx.text()).is_empty()
}

fn dangerous_advice(ctx: &RuleContext<'_>) -> String {
    format!(
        "Dangerous functions detected: {}",
        ctx.primitives.dangerous_calls(ctx.text()).join(", ")
    )
}

fn unescaped_echo(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.echoes_request_input(ctx.text())
}

fn sql_injection(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.has_sql_injection_shape(ctx.text())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::absent(
            "security_dangerous_functions",
            "No dangerous PHP functions",
            Check::Probe(dangerous_calls),
        )
        .with_advice(Advice::Computed(dangerous_advice)),
        Rule::absent(
            "security_xss_protection",
            "No direct user input echoing",
            Check::Probe(unescaped_echo),
        )
        .with_advice(Advice::Fixed(
            "Potential XSS vulnerability: Use htmlspecialchars() for user input",
        )),
        Rule::absent(
            "security_sql_injection",
            "No direct SQL query with user input",
            Check::Probe(sql_injection),
        )
        .with_advice(Advice::Fixed(
            "Potential SQL injection: Use prepared statements",
        )),
    ]
}
