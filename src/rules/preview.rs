//! Desktop file-manager preview: readable, correctly named, recognisable.

use super::{Check, Rule, RuleContext};

fn readable(ctx: &RuleContext<'_>) -> bool {
    ctx.document.is_readable()
}

fn target_extension(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives
        .is_target_extension(ctx.document.extension().as_deref())
}

fn svg_header(ctx: &RuleContext<'_>) -> bool {
    let text = ctx.text();
    text.starts_with("<?xml") || text.contains("<svg")
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::present("file_readable", "File is readable", Check::Probe(readable)),
        Rule::present(
            "correct_extension",
            "Correct .svg extension",
            Check::Probe(target_extension),
        ),
        Rule::present("svg_header", "SVG header present", Check::Probe(svg_header)),
    ]
}
