//! Sample documents and a one-call group runner for rule tests.

use crate::document::Document;
use crate::report::GroupOutcome;
use crate::syntax::SyntaxOutcome;

use super::{PrimitiveOptions, Primitives, RuleContext, RuleGroup, RuleSet};

/// Hybrid document that passes every core rule.
pub const HYBRID_FORM: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xhtml="http://www.w3.org/1999/xhtml" width="400" height="200" viewBox="0 0 400 200">
  <rect x="0" y="0" width="400" height="200" fill="#eee"/>
  <text x="10" y="20"><?php echo htmlspecialchars($title); ?></text>
  <foreignObject x="10" y="40" width="380" height="120">
    <xhtml:form method="post">
      <xhtml:input type="text" name="q"/>
      <xhtml:button type="submit">Send</xhtml:button>
    </xhtml:form>
  </foreignObject>
</svg>
"##;

/// Plain static SVG, no embedded code.
pub const PLAIN_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#;

pub fn primitives() -> Primitives {
    Primitives::new(&PrimitiveOptions::default()).unwrap()
}

pub fn evaluate_at(group: RuleGroup, path: &str, text: &str) -> GroupOutcome {
    evaluate_document(group, &Document::from_text(path, text), None)
}

pub fn evaluate(group: RuleGroup, text: &str) -> GroupOutcome {
    evaluate_at(group, "doc.svg", text)
}

pub fn evaluate_document(
    group: RuleGroup,
    document: &Document,
    syntax: Option<&SyntaxOutcome>,
) -> GroupOutcome {
    let primitives = primitives();
    let ctx = RuleContext {
        document,
        primitives: &primitives,
        syntax,
    };
    RuleSet::for_group(group).unwrap().evaluate(&ctx)
}

/// Passed flag of the named record, panicking if it is missing.
pub fn passed(outcome: &GroupOutcome, name: &str) -> bool {
    outcome
        .tests
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no test named {name}"))
        .passed
}

pub fn description<'a>(outcome: &'a GroupOutcome, name: &str) -> &'a str {
    &outcome
        .tests
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no test named {name}"))
        .description
}
