use super::primitives::kib;
use super::{Advice, Check, Rule, RuleContext};

fn disallowed_element(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.has_disallowed_element(ctx.text())
}

fn under_size_ceiling(ctx: &RuleContext<'_>) -> bool {
    ctx.document.size() < ctx.primitives.max_document_size()
}

fn size_advice(ctx: &RuleContext<'_>) -> String {
    format!(
        "File size is {}KB, consider optimization",
        kib(ctx.document.size())
    )
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::absent(
            "standard_elements",
            "Uses only standard SVG elements (foreignObject allowed)",
            Check::Probe(disallowed_element),
        ),
        // Placeholder signal: no property-level compatibility data is consulted.
        Rule::present(
            "css_compatibility",
            "CSS properties compatible",
            Check::Always,
        ),
        Rule::present(
            "file_size",
            "File size under 1MB",
            Check::Probe(under_size_ceiling),
        )
        .with_advice(Advice::Computed(size_advice)),
    ]
}
