//! Embedded PHP integration. The security checks are appended to this group.

use super::primitives::{self, PHP_ECHO_OPEN, PHP_OPEN};
use super::{security, Check, Rule, RuleContext};

fn php_in_svg(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.php_in_svg_body(ctx.text())
}

fn hybrid_structure(ctx: &RuleContext<'_>) -> bool {
    ctx.primitives.has_hybrid_structure(ctx.text())
}

fn utf8(ctx: &RuleContext<'_>) -> bool {
    primitives::is_utf8(ctx.document.bytes())
}

pub fn rules() -> Vec<Rule> {
    let mut rules = vec![
        Rule::present(
            "php_in_svg",
            "PHP code embedded within SVG tags",
            Check::Probe(php_in_svg),
        ),
        Rule::present(
            "php_tags_present",
            "PHP tags present in file",
            Check::ContainsAny(&[PHP_OPEN, PHP_ECHO_OPEN]),
        ),
        Rule::present(
            "php_svg_structure",
            "Proper PHP+SVG file structure",
            Check::Probe(hybrid_structure),
        ),
        Rule::present("utf8_encoding", "UTF-8 encoding", Check::Probe(utf8)),
    ];
    rules.extend(security::rules());
    rules
}
