//! Rule groups as declarative tables.
//!
//! Each group module exposes a `rules()` table of [`Rule`] descriptors. A
//! [`RuleSet`] compiles one table and evaluates it against a [`RuleContext`],
//! producing a [`GroupOutcome`] that the engine merges into the report.

mod browser;
mod embedded;
mod forms;
pub mod primitives;
mod preview;
mod pwa;
mod runtime;
mod security;
mod structure;

pub use primitives::{PrimitiveOptions, Primitives};

use regex::Regex;

use crate::document::Document;
use crate::error::Result;
use crate::report::{GroupOutcome, TestRecord};
use crate::syntax::SyntaxOutcome;

/// Inputs visible to a rule: the document snapshot and derived values.
pub struct RuleContext<'a> {
    pub document: &'a Document,
    pub primitives: &'a Primitives,
    /// Outcome of the external syntax check, when the runtime group runs.
    pub syntax: Option<&'a SyntaxOutcome>,
}

impl RuleContext<'_> {
    #[must_use]
    pub fn text(&self) -> &str {
        self.document.text()
    }
}

pub type Probe = fn(&RuleContext<'_>) -> bool;
pub type AdviceFn = fn(&RuleContext<'_>) -> String;

/// What a rule looks for.
#[derive(Clone, Copy)]
pub enum Check {
    /// Substring present.
    Contains(&'static str),
    /// Every substring present.
    ContainsAll(&'static [&'static str]),
    /// At least one substring present.
    ContainsAny(&'static [&'static str]),
    /// At least one pattern matches.
    Pattern(&'static [&'static str]),
    /// Derived predicate.
    Probe(Probe),
    /// Always holds.
    Always,
}

/// Whether a rule passes when its check holds or when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Present,
    Absent,
}

/// Test description, optionally chosen by a predicate.
#[derive(Clone, Copy)]
pub enum Label {
    Fixed(&'static str),
    Either {
        when: Probe,
        then: &'static str,
        otherwise: &'static str,
    },
}

/// Warning attached to a failing rule.
#[derive(Clone, Copy)]
pub enum Advice {
    Fixed(&'static str),
    Computed(AdviceFn),
}

/// One row of a rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub label: Label,
    pub check: Check,
    pub expect: Expect,
    pub advice: Option<Advice>,
}

impl Rule {
    #[must_use]
    pub const fn present(name: &'static str, description: &'static str, check: Check) -> Self {
        Self {
            name,
            label: Label::Fixed(description),
            check,
            expect: Expect::Present,
            advice: None,
        }
    }

    #[must_use]
    pub const fn absent(name: &'static str, description: &'static str, check: Check) -> Self {
        Self {
            name,
            label: Label::Fixed(description),
            check,
            expect: Expect::Absent,
            advice: None,
        }
    }

    #[must_use]
    pub const fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub const fn with_advice(mut self, advice: Advice) -> Self {
        self.advice = Some(advice);
        self
    }
}

/// Named rule groups, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleGroup {
    Structure,
    Pwa,
    EmbeddedCode,
    Browser,
    Preview,
    Forms,
    Runtime,
}

impl RuleGroup {
    /// Groups that always run.
    pub const CORE: [Self; 6] = [
        Self::Structure,
        Self::Pwa,
        Self::EmbeddedCode,
        Self::Browser,
        Self::Preview,
        Self::Forms,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Pwa => "pwa",
            Self::EmbeddedCode => "embedded-code",
            Self::Browser => "browser",
            Self::Preview => "preview",
            Self::Forms => "forms",
            Self::Runtime => "runtime",
        }
    }

    #[must_use]
    pub fn rules(self) -> Vec<Rule> {
        match self {
            Self::Structure => structure::rules(),
            Self::Pwa => pwa::rules(),
            Self::EmbeddedCode => embedded::rules(),
            Self::Browser => browser::rules(),
            Self::Preview => preview::rules(),
            Self::Forms => forms::rules(),
            Self::Runtime => runtime::rules(),
        }
    }
}

enum CompiledCheck {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
    ContainsAny(&'static [&'static str]),
    Pattern(Vec<Regex>),
    Probe(Probe),
    Always,
}

impl CompiledCheck {
    fn compile(check: Check) -> Result<Self> {
        Ok(match check {
            Check::Contains(s) => Self::Contains(s),
            Check::ContainsAll(s) => Self::ContainsAll(s),
            Check::ContainsAny(s) => Self::ContainsAny(s),
            Check::Pattern(patterns) => Self::Pattern(
                patterns
                    .iter()
                    .map(|p| primitives::compile(p))
                    .collect::<Result<_>>()?,
            ),
            Check::Probe(f) => Self::Probe(f),
            Check::Always => Self::Always,
        })
    }

    fn holds(&self, ctx: &RuleContext<'_>) -> bool {
        let text = ctx.text();
        match self {
            Self::Contains(s) => text.contains(s),
            Self::ContainsAll(all) => all.iter().all(|s| text.contains(s)),
            Self::ContainsAny(any) => any.iter().any(|s| text.contains(s)),
            Self::Pattern(res) => res.iter().any(|re| re.is_match(text)),
            Self::Probe(f) => f(ctx),
            Self::Always => true,
        }
    }
}

struct CompiledRule {
    rule: Rule,
    check: CompiledCheck,
}

impl CompiledRule {
    fn evaluate(&self, ctx: &RuleContext<'_>, outcome: &mut GroupOutcome) {
        let holds = self.check.holds(ctx);
        let passed = match self.rule.expect {
            Expect::Present => holds,
            Expect::Absent => !holds,
        };
        let description = match self.rule.label {
            Label::Fixed(d) => d,
            Label::Either {
                when,
                then,
                otherwise,
            } => {
                if when(ctx) {
                    then
                } else {
                    otherwise
                }
            }
        };
        outcome
            .tests
            .push(TestRecord::new(self.rule.name, description, passed));

        if !passed {
            match self.rule.advice {
                Some(Advice::Fixed(message)) => outcome.warnings.push(message.to_string()),
                Some(Advice::Computed(f)) => outcome.warnings.push(f(ctx)),
                None => {}
            }
        }
    }
}

/// A compiled rule table for one group.
pub struct RuleSet {
    group: RuleGroup,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile the table of `group`.
    ///
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn for_group(group: RuleGroup) -> Result<Self> {
        Self::from_rules(group, group.rules())
    }

    /// Compile an arbitrary table.
    ///
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn from_rules(group: RuleGroup, rules: Vec<Rule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                CompiledCheck::compile(rule.check).map(|check| CompiledRule { rule, check })
            })
            .collect::<Result<_>>()?;
        Ok(Self { group, rules })
    }

    #[must_use]
    pub const fn group(&self) -> RuleGroup {
        self.group
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule in table order.
    #[must_use]
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> GroupOutcome {
        let mut outcome = GroupOutcome::default();
        for rule in &self.rules {
            rule.evaluate(ctx, &mut outcome);
        }
        tracing::debug!(
            group = self.group.name(),
            tests = outcome.tests.len(),
            failed = outcome.tests.iter().filter(|t| !t.passed).count(),
            "evaluated rule group"
        );
        outcome
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
