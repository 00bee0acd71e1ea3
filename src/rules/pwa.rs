//! Progressive-web-app constraints: everything inline, nothing fetched.

use super::{Check, Rule};

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::absent(
            "inline_styles",
            "Uses inline styles",
            Check::Pattern(&[r#"link[^>]*rel=["']*stylesheet["']"#]),
        ),
        Rule::present(
            "responsive_design",
            "Responsive design elements",
            Check::ContainsAny(&["viewBox=", "preserveAspectRatio="]),
        ),
        Rule::absent(
            "no_js_deps",
            "No external JavaScript dependencies",
            Check::Pattern(&[r"<script[^>]*src="]),
        ),
        Rule::absent(
            "self_contained",
            "Self-contained SVG",
            Check::Pattern(&[r#"src=["'](http|https|//)"#, r#"href=["'](http|https|//)"#]),
        ),
    ]
}
