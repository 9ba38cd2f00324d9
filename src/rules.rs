use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

use crate::error::{PatchError, PatchResult};

/// Null-safe rewrite of `getJsonField(...)!.length`
pub const SAFE_LENGTH: &str =
    "((getJsonField(listItemsItem, r'''$.subtasks''', true) as List?)?.length ?? 0)";

/// Null-safe rewrite of `getJsonField(...)![loop1Index]`
pub const SAFE_INDEX: &str =
    "(getJsonField(listItemsItem, r'''$.subtasks''', true) as List?)?[loop1Index]";

/// Static description of a rule before its pattern is compiled
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// The rules in the order they run. The narrow forms expect the generated
/// `true,` argument tail; the loose forms accept anything up to `)`.
pub const BUILTIN_RULES: [RuleSpec; 4] = [
    RuleSpec {
        name: "subtasks_length",
        pattern: r"getJsonField\(\s*listItemsItem,\s*r'''\$.subtasks''',\s*true,\s*\)!\s*\.length",
        replacement: SAFE_LENGTH,
    },
    RuleSpec {
        name: "subtasks_index",
        pattern: r"getJsonField\(\s*listItemsItem,\s*r'''\$.subtasks''',\s*true,\s*\)!\[loop1Index\]",
        replacement: SAFE_INDEX,
    },
    RuleSpec {
        name: "subtasks_length_loose",
        pattern: r"getJsonField\(\s*listItemsItem,\s*r'''\$.subtasks''',[^)]*\)!\s*\.length",
        replacement: SAFE_LENGTH,
    },
    RuleSpec {
        name: "subtasks_index_loose",
        pattern: r"getJsonField\(\s*listItemsItem,\s*r'''\$.subtasks''',[^)]*\)!\[loop1Index\]",
        replacement: SAFE_INDEX,
    },
];

/// A compiled substitution rule
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub name: &'static str,
    regex: Regex,
    replacement: &'static str,
}

impl SubstitutionRule {
    pub fn compile(spec: &RuleSpec) -> PatchResult<Self> {
        let regex = Regex::new(spec.pattern).map_err(|source| PatchError::InvalidPattern {
            rule: spec.name,
            source,
        })?;

        Ok(Self {
            name: spec.name,
            regex,
            replacement: spec.replacement,
        })
    }

    /// Replaces every non-overlapping match. The replacement is literal, so
    /// the `$` in `$.subtasks` is never read as a capture group.
    pub fn apply<'a>(&self, text: &'a str) -> (Cow<'a, str>, usize) {
        let count = self.regex.find_iter(text).count();
        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        (self.regex.replace_all(text, NoExpand(self.replacement)), count)
    }
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: /{}/", self.name, self.regex.as_str())
    }
}

/// How many replacements one rule made during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub replacements: usize,
}

/// Ordered list of rules; the output of rule N is the input of rule N+1
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// Compile the four built-in rules
    pub fn builtin() -> PatchResult<Self> {
        let rules = BUILTIN_RULES
            .iter()
            .map(SubstitutionRule::compile)
            .collect::<PatchResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn apply(&self, text: &str) -> (String, Vec<RuleOutcome>) {
        let mut buffer = text.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (patched, replacements) = rule.apply(&buffer);
            debug!("Rule {} made {} replacement(s)", rule.name, replacements);
            if replacements > 0 {
                buffer = patched.into_owned();
            }
            outcomes.push(RuleOutcome {
                rule: rule.name,
                replacements,
            });
        }

        (buffer, outcomes)
    }
}
