//! Markup structure: well-formedness, namespace, root element, sizing, and
//! the flat-tree requirement.

use super::primitives::has_php_marker;
use super::{Check, Label, Rule, RuleContext};

fn well_formed(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.is_well_formed(ctx.text())
}

fn is_hybrid(ctx: &RuleContext<'_>) -> bool {
    has_php_marker(ctx.text())
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::present("valid_xml", "Valid XML structure", Check::Probe(well_formed)).with_label(
            Label::Either {
                when: is_hybrid,
                then: "Valid XML structure (PHP+SVG compatible)",
                otherwise: "Valid XML structure",
            },
        ),
        Rule::present(
            "svg_namespace",
            "SVG namespace present",
            Check::ContainsAny(&[
                r#"xmlns="http://www.w3.org/2000/svg""#,
                r#"xmlns:svg="http://www.w3.org/2000/svg""#,
            ]),
        ),
        Rule::present(
            "root_svg_element",
            "Root SVG element present",
            Check::Pattern(&[r"<svg[^>]*>"]),
        ),
        Rule::present(
            "viewbox_attribute",
            "ViewBox attribute present",
            Check::Contains("viewBox="),
        ),
        Rule::present(
            "dimensions",
            "Width and Height defined",
            Check::ContainsAll(&["width=", "height="]),
        ),
        Rule::absent(
            "no_external_deps",
            "No external dependencies",
            Check::Pattern(&[r#"(?i)href=["']((http|https|ftp)://)"#]),
        ),
        Rule::absent(
            "no_g_transform",
            "No g transform elements",
            Check::Pattern(&[r"<g[^>]*transform="]),
        ),
        Rule::absent(
            "no_g_elements",
            "No g elements (use direct SVG elements instead)",
            Check::Pattern(&[r"<g[\s>]"]),
        ),
    ]
}
