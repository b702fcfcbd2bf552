//! Heading hierarchy rules.
//!
//! Each rule is stateless and inspects the whole heading sequence of one
//! notebook. A [`RuleSet`] runs the enabled rules in order and concatenates
//! their violations; order only affects how violations are reported.

use crate::ConfigError;
use crate::headings::Heading;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Identifies a heading rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// A heading more than one level deeper than its predecessor.
    Indent,
    /// A heading shallower than the first heading.
    Dedent,
    /// The first heading is not level 1.
    FirstHeading,
    /// The notebook does not have exactly one level-1 heading.
    SingleRoot,
}

impl RuleKind {
    /// All rule kinds, in default execution order.
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Indent,
        RuleKind::Dedent,
        RuleKind::FirstHeading,
        RuleKind::SingleRoot,
    ];

    /// Stable configuration name.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Indent => "indent",
            RuleKind::Dedent => "dedent",
            RuleKind::FirstHeading => "first-heading",
            RuleKind::SingleRoot => "single-root",
        }
    }

    /// Names of all rule kinds.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Instantiates the rule.
    pub fn rule(self) -> Box<dyn HeadingRule> {
        match self {
            RuleKind::Indent => Box::new(IndentRule),
            RuleKind::Dedent => Box::new(DedentRule),
            RuleKind::FirstHeading => Box::new(FirstHeadingRule),
            RuleKind::SingleRoot => Box::new(SingleRootRule),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownRule(s.to_string()))
    }
}

/// The heading(s) a violation points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offending {
    /// A single heading.
    Single(Heading),
    /// A reference heading and the heading that breaks the rule against it.
    Pair(Heading, Heading),
}

impl Offending {
    /// The headings involved, reference first.
    pub fn headings(&self) -> Vec<&Heading> {
        match self {
            Offending::Single(heading) => vec![heading],
            Offending::Pair(first, second) => vec![first, second],
        }
    }
}

/// One broken heading rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that was broken.
    pub rule: RuleKind,
    /// Offending heading(s).
    pub offending: Offending,
}

impl Violation {
    fn single(rule: RuleKind, heading: &Heading) -> Self {
        Self {
            rule,
            offending: Offending::Single(heading.clone()),
        }
    }

    fn pair(rule: RuleKind, first: &Heading, second: &Heading) -> Self {
        Self {
            rule,
            offending: Offending::Pair(first.clone(), second.clone()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule)?;
        for heading in self.offending.headings() {
            write!(f, ":level={}(cell={})", heading.level, heading.cell)?;
        }
        Ok(())
    }
}

/// A structural check over a heading sequence.
pub trait HeadingRule {
    /// Which rule this is.
    fn kind(&self) -> RuleKind;

    /// Returns every violation found in `headings`.
    fn validate(&self, headings: &[Heading]) -> Vec<Violation>;
}

/// Flags a heading that skips a level on the way down.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentRule;

impl HeadingRule for IndentRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Indent
    }

    fn validate(&self, headings: &[Heading]) -> Vec<Violation> {
        headings
            .windows(2)
            .filter(|pair| i16::from(pair[1].level) - i16::from(pair[0].level) > 1)
            .map(|pair| Violation::pair(self.kind(), &pair[0], &pair[1]))
            .collect()
    }
}

/// Flags headings above the level of the first heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedentRule;

impl HeadingRule for DedentRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Dedent
    }

    fn validate(&self, headings: &[Heading]) -> Vec<Violation> {
        let Some((first, rest)) = headings.split_first() else {
            return Vec::new();
        };
        rest.iter()
            .filter(|heading| heading.level < first.level)
            .map(|heading| Violation::pair(self.kind(), first, heading))
            .collect()
    }
}

/// Flags a first heading that is not level 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstHeadingRule;

impl HeadingRule for FirstHeadingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::FirstHeading
    }

    fn validate(&self, headings: &[Heading]) -> Vec<Violation> {
        match headings.first() {
            Some(first) if first.level != 1 => vec![Violation::single(self.kind(), first)],
            _ => Vec::new(),
        }
    }
}

/// Requires exactly one level-1 heading.
///
/// When the count is off every level-1 heading is reported, so a notebook
/// without any level-1 heading yields no violations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRootRule;

impl HeadingRule for SingleRootRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SingleRoot
    }

    fn validate(&self, headings: &[Heading]) -> Vec<Violation> {
        let roots: Vec<&Heading> = headings.iter().filter(|h| h.level == 1).collect();
        if roots.len() == 1 {
            return Vec::new();
        }
        roots
            .into_iter()
            .map(|heading| Violation::single(self.kind(), heading))
            .collect()
    }
}

/// Ordered list of enabled rules.
pub struct RuleSet {
    rules: Vec<Box<dyn HeadingRule>>,
}

impl RuleSet {
    /// Builds a rule set from kinds; repeated kinds run once, at their first position.
    pub fn new(kinds: impl IntoIterator<Item = RuleKind>) -> Self {
        let mut seen = Vec::new();
        let mut rules = Vec::new();
        for kind in kinds {
            if !seen.contains(&kind) {
                seen.push(kind);
                rules.push(kind.rule());
            }
        }
        Self { rules }
    }

    /// Kinds of the enabled rules, in execution order.
    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|rule| rule.kind()).collect()
    }

    /// True if no rule is enabled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule in order and concatenates their violations.
    pub fn validate(&self, headings: &[Heading]) -> Vec<Violation> {
        self.rules
            .iter()
            .flat_map(|rule| rule.validate(headings))
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(RuleKind::ALL)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}
