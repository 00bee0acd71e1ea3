//! Interactive form elements: real HTML controls inside foreignObject
//! instead of SVG shapes with click handlers.

use super::primitives::FOREIGN_OBJECT_OPEN;
use super::{Advice, Check, Label, Rule, RuleContext};

fn has_foreign_object(ctx: &RuleContext<'_>) -> bool {
    ctx.text().contains(FOREIGN_OBJECT_OPEN)
}

fn form_controls_embedded(ctx: &RuleContext<'_>) -> bool {
    !has_foreign_object(ctx) || ctx.primitives.has_form_controls(ctx.text())
}

fn pseudo_buttons_tolerated(ctx: &RuleContext<'_>) -> bool {
    let text = ctx.text();
    let rect_with_onclick = ctx.primitives.has_clickable_rect(text);
    let class_pair = text.contains(r#"class="button""#) && text.contains(r#"class="button-text""#);
    let hybrid = text.contains("<xhtml:button") || text.contains("<xhtml:input");
    !(rect_with_onclick || class_pair) || hybrid
}

fn interactivity_embedded(ctx: &RuleContext<'_>) -> bool {
    !ctx.text().contains("onclick=") || has_foreign_object(ctx)
}

fn xhtml_namespace(ctx: &RuleContext<'_>) -> bool {
    !has_foreign_object(ctx) || ctx.primitives.has_xhtml_namespace_on_root(ctx.text())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::present(
            "foreign_object_present",
            "foreignObject elements present",
            Check::Contains(FOREIGN_OBJECT_OPEN),
        )
        .with_advice(Advice::Fixed(
            "Consider using foreignObject to embed HTML form elements for better interactivity",
        )),
        Rule::present(
            "html_form_elements",
            "HTML form elements (input, button) in foreignObject",
            Check::Probe(form_controls_embedded),
        )
        .with_label(Label::Either {
            when: has_foreign_object,
            then: "HTML form elements (input, button) in foreignObject",
            otherwise: "HTML form elements not required (no foreignObject)",
        }),
        Rule::present(
            "no_pseudo_buttons",
            "No pseudo-buttons (or hybrid usage allowed)",
            Check::Probe(pseudo_buttons_tolerated),
        ),
        Rule::present(
            "proper_interactivity",
            "Interactive elements properly embedded",
            Check::Probe(interactivity_embedded),
        ),
        Rule::present(
            "xhtml_namespace",
            "XHTML namespace present when using foreignObject",
            Check::Probe(xhtml_namespace),
        )
        .with_advice(Advice::Fixed(
            "Add xmlns:xhtml='http://www.w3.org/1999/xhtml' to <svg> tag when using foreignObject with HTML",
        )),
    ]
}
