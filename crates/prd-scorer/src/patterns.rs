//! Detection rules shared by the category evaluators.
//!
//! Every pattern is compiled once on first use and never mutated afterwards.
//! `regex::Regex` keeps no match cursor between calls, so each detector is a
//! pure function of its input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A heading the document is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredSection {
    pub name: &'static str,
    pub weight: u32,
    #[serde(skip)]
    keywords: &'static str,
}

/// The eight required sections with their structure weights. Detection is
/// presence-only and order-independent; the credit is capped at 12.
pub const REQUIRED_SECTIONS: [RequiredSection; 8] = [
    RequiredSection {
        name: "Purpose/Introduction",
        weight: 2,
        keywords: r"purpose|introduction|overview|objective|executive\s+summary",
    },
    RequiredSection {
        name: "User Personas",
        weight: 2,
        keywords: r"user\s*persona|personas?|audience|target\s+user|customer\s+profile",
    },
    RequiredSection {
        name: "Features/Requirements",
        weight: 2,
        keywords: r"feature|requirement|user\s+stor|functional",
    },
    RequiredSection {
        name: "Success Metrics",
        weight: 2,
        keywords: r"success|metric|kpi|measure",
    },
    RequiredSection {
        name: "Scope Definition",
        weight: 1,
        keywords: r"scope|out.of.scope|boundary|boundaries",
    },
    RequiredSection {
        name: "Timeline/Milestones",
        weight: 1,
        keywords: r"timeline|milestone|schedule|roadmap|phase",
    },
    RequiredSection {
        name: "Risks/Dependencies",
        weight: 1,
        keywords: r"risk|dependency|dependencies|assumption",
    },
    RequiredSection {
        name: "Constraints",
        weight: 1,
        keywords: r"constraint|limitation",
    },
];

/// Marketing-style phrases penalized as imprecise. Matched as lower-cased
/// substrings, so "fast" also fires inside "breakfast".
pub const VAGUE_QUALIFIERS: [&str; 19] = [
    "easy to use",
    "user-friendly",
    "fast",
    "quick",
    "responsive",
    "good performance",
    "high quality",
    "scalable",
    "flexible",
    "intuitive",
    "seamless",
    "robust",
    "efficient",
    "optimal",
    "minimal",
    "sufficient",
    "reasonable",
    "appropriate",
    "adequate",
];

/// Builds a heading detector tolerant of numeric prefixes such as "1.1".
fn numbered_heading(keywords: &str) -> Regex {
    Regex::new(&format!(r"(?im)^#+\s*([0-9]+\.?[0-9]*\.?\s*)?({keywords})"))
        .expect("valid regex")
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    REQUIRED_SECTIONS
        .iter()
        .map(|section| numbered_heading(section.keywords))
        .collect()
});

static HEADING: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#+\s+"));
static TOP_LEVEL_HEADING: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#\s+"));
static SECOND_LEVEL_HEADING: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^##\s+"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^\s*[-*]\s+"));
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| regex(r"\|.*\|"));

static IN_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?-u:\b)(in.scope|included|within scope)(?-u:\b)"));
static OUT_OF_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?-u:\b)(out.of.scope|not included|excluded|won't)(?-u:\b)"));

static USER_STORY: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)as\s+an?\s+[A-Za-z0-9_\s]+,?\s+i\s+want"));
static INLINE_ACCEPTANCE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(?:\*\*)?given(?:\*\*)?\s+.+?(?:\*\*)?when(?:\*\*)?\s+.+?(?:\*\*)?then(?:\*\*)?\s+")
});
static BULLET_ACCEPTANCE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)-\s*\*\*Given\*\*"));
static MEASURABLE: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r"(?i)(?:≤|≥|<|>|=)?\s*[0-9]+(?:\.[0-9]+)?\s*(ms|millisecond|second|minute|hour|day|week|%|percent|\$|dollar|user|request|transaction|item|task|point|pt)",
    )
});
static MOSCOW: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r"(?i)(?-u:\b)(must have|should have|could have|won't have|must-have|should-have|could-have|won't-have)(?-u:\b)",
    )
});
static P_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(?-u:\b)(p0|p1|p2|p3|priority\s*[0-3]|priority:\s*(high|medium|low|critical))(?-u:\b)")
});

static PERSONA_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    numbered_heading(r"user\s*persona|personas?|target\s+user|audience|customer\s+profile")
});
static PROBLEM_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    numbered_heading(r"problem|goal|objective|why|motivation|current\s+state|target\s+state")
});
static USER_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?-u:\b)(user|customer|persona)(?-u:\b)"));
static RESEARCH: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)(?-u:\b)(user research|customer research|user interview|survey result)(?-u:\b)")
});
static LONG_QUOTE: LazyLock<Regex> = LazyLock::new(|| regex(r#""[^"]{10,}""#));

static NFR_PATTERNS: LazyLock<[(NfrCategory, Regex); 4]> = LazyLock::new(|| {
    [
        (
            NfrCategory::Performance,
            regex(r"(?i)(?-u:\b)(performance|latency|response.?time)(?-u:\b)"),
        ),
        (
            NfrCategory::Security,
            regex(r"(?i)(?-u:\b)(security|authentication|authorization)(?-u:\b)"),
        ),
        (
            NfrCategory::Reliability,
            regex(r"(?i)(?-u:\b)(reliability|availability|uptime)(?-u:\b)"),
        ),
        (
            NfrCategory::Scalability,
            regex(r"(?i)(?-u:\b)(scalability|capacity)(?-u:\b)"),
        ),
    ]
});
static DEPENDENCY_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?im)^#+\s*(risk|dependency|dependencies|assumption|constraint)")
});

// --- Structure ---

/// Required sections split by whether their heading appears in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionCoverage {
    pub found: Vec<RequiredSection>,
    pub missing: Vec<RequiredSection>,
}

impl SectionCoverage {
    /// Sum of the weights of all found sections, before capping.
    pub fn weight(&self) -> u32 {
        self.found.iter().map(|s| s.weight).sum()
    }
}

pub fn detect_sections(text: &str) -> SectionCoverage {
    let mut coverage = SectionCoverage::default();
    for (section, pattern) in REQUIRED_SECTIONS.iter().zip(SECTION_PATTERNS.iter()) {
        if pattern.is_match(text) {
            coverage.found.push(*section);
        } else {
            coverage.missing.push(*section);
        }
    }
    coverage
}

pub fn count_headings(text: &str) -> usize {
    HEADING.find_iter(text).count()
}

pub fn has_top_level_heading(text: &str) -> bool {
    TOP_LEVEL_HEADING.is_match(text)
}

pub fn has_second_level_heading(text: &str) -> bool {
    SECOND_LEVEL_HEADING.is_match(text)
}

pub fn has_bullet_list(text: &str) -> bool {
    BULLET.is_match(text)
}

/// A line with at least two pipes is taken to be a markdown table row.
pub fn has_table(text: &str) -> bool {
    TABLE_ROW.is_match(text)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScopeBoundaries {
    pub in_scope: bool,
    pub out_of_scope: bool,
}

impl ScopeBoundaries {
    pub fn points(self) -> u32 {
        match (self.in_scope, self.out_of_scope) {
            (true, true) => 2,
            (false, false) => 0,
            _ => 1,
        }
    }
}

pub fn detect_scope_boundaries(text: &str) -> ScopeBoundaries {
    ScopeBoundaries {
        in_scope: IN_SCOPE.is_match(text),
        out_of_scope: OUT_OF_SCOPE.is_match(text),
    }
}

// --- Clarity ---

/// Distinct vague qualifiers present in the text, in table order.
pub fn detect_vague_qualifiers(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    VAGUE_QUALIFIERS
        .iter()
        .copied()
        .filter(|qualifier| lower.contains(qualifier))
        .collect()
}

const VAGUE_QUANTIFIERS: &[&str] = &[
    "many",
    "several",
    "some",
    "few",
    "various",
    "numerous",
    "multiple",
    "a lot",
    "a number of",
    "a bit",
    "a little",
];
const VAGUE_TEMPORAL: &[&str] = &[
    "soon",
    "quickly",
    "rapidly",
    "promptly",
    "eventually",
    "in the future",
    "as soon as possible",
    "asap",
    "shortly",
    "in due time",
];
const WEASEL_WORDS: &[&str] = &[
    "should be able to",
    "could potentially",
    "generally",
    "typically",
    "usually",
    "often",
    "sometimes",
];
const MARKETING_FLUFF: &[&str] = &[
    "best-in-class",
    "world-class",
    "cutting-edge",
    "next-generation",
    "state-of-the-art",
    "industry-leading",
    "innovative",
    "revolutionary",
];
const UNQUANTIFIED_COMPARATIVES: &[&str] = &[
    "better",
    "faster",
    "more efficient",
    "improved",
    "enhanced",
    "easier",
    "simpler",
    "cheaper",
    "superior",
    "optimized",
];

type TermPatterns = Vec<(&'static str, Regex)>;

fn whole_word_terms(terms: &[&'static str]) -> TermPatterns {
    terms
        .iter()
        .map(|term| {
            let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", regex::escape(term));
            (*term, regex(&pattern))
        })
        .collect()
}

static VAGUE_LANGUAGE_PATTERNS: LazyLock<[TermPatterns; 6]> = LazyLock::new(|| {
    [
        whole_word_terms(&VAGUE_QUALIFIERS),
        whole_word_terms(VAGUE_QUANTIFIERS),
        whole_word_terms(VAGUE_TEMPORAL),
        whole_word_terms(WEASEL_WORDS),
        whole_word_terms(MARKETING_FLUFF),
        whole_word_terms(UNQUANTIFIED_COMPARATIVES),
    ]
});

/// Imprecise wording grouped by kind. Terms match as whole words, ignoring
/// case, so "some" does not fire inside "sometimes". Informational only: the
/// clarity score uses [`detect_vague_qualifiers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VagueLanguage {
    pub qualifiers: Vec<&'static str>,
    pub quantifiers: Vec<&'static str>,
    pub temporal: Vec<&'static str>,
    pub weasel_words: Vec<&'static str>,
    pub marketing_fluff: Vec<&'static str>,
    pub unquantified_comparatives: Vec<&'static str>,
}

impl VagueLanguage {
    pub fn total_count(&self) -> usize {
        self.qualifiers.len()
            + self.quantifiers.len()
            + self.temporal.len()
            + self.weasel_words.len()
            + self.marketing_fluff.len()
            + self.unquantified_comparatives.len()
    }
}

pub fn detect_vague_language(text: &str) -> VagueLanguage {
    let [qualifiers, quantifiers, temporal, weasel_words, marketing_fluff, comparatives] =
        VAGUE_LANGUAGE_PATTERNS.each_ref().map(|terms| {
            terms
                .iter()
                .filter(|(_, pattern)| pattern.is_match(text))
                .map(|(term, _)| *term)
                .collect::<Vec<_>>()
        });
    VagueLanguage {
        qualifiers,
        quantifiers,
        temporal,
        weasel_words,
        marketing_fluff,
        unquantified_comparatives: comparatives,
    }
}

/// Counts every "As a <role>, I want" occurrence, repeats included.
pub fn count_user_stories(text: &str) -> usize {
    USER_STORY.find_iter(text).count()
}

pub fn count_measurable_requirements(text: &str) -> usize {
    MEASURABLE.find_iter(text).count()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Prioritization {
    pub moscow: usize,
    pub p_level: usize,
}

impl Prioritization {
    pub fn is_prioritized(self) -> bool {
        self.moscow > 0 || self.p_level > 0
    }
}

pub fn detect_prioritization(text: &str) -> Prioritization {
    Prioritization {
        moscow: MOSCOW.find_iter(text).count(),
        p_level: P_LEVEL.find_iter(text).count(),
    }
}

// --- User focus ---

pub fn has_persona_section(text: &str) -> bool {
    PERSONA_SECTION.is_match(text)
}

pub fn has_problem_statement(text: &str) -> bool {
    PROBLEM_SECTION.is_match(text)
}

/// Whole-word mentions of "user", "customer" or "persona".
pub fn count_user_references(text: &str) -> usize {
    USER_REFERENCE.find_iter(text).count()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerEvidence {
    pub research: bool,
    pub quotes: bool,
}

impl CustomerEvidence {
    pub fn is_present(self) -> bool {
        self.research || self.quotes
    }
}

pub fn detect_customer_evidence(text: &str) -> CustomerEvidence {
    CustomerEvidence {
        research: RESEARCH.is_match(text),
        quotes: LONG_QUOTE.is_match(text),
    }
}

// --- Technical quality ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NfrCategory {
    Performance,
    Security,
    Reliability,
    Scalability,
}

/// Non-functional requirement categories mentioned anywhere in the text.
pub fn detect_non_functional_requirements(text: &str) -> Vec<NfrCategory> {
    NFR_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(category, _)| *category)
        .collect()
}

/// Given/When/Then occurrences in both surface forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AcceptanceCriteria {
    /// Inline "Given ... When ... Then ..." statements, bold markers optional.
    pub inline: usize,
    /// Bullet lines starting with a bold "Given".
    pub bullet: usize,
}

impl AcceptanceCriteria {
    /// A bulleted criterion also matches the inline form, so the forms are
    /// combined with `max` rather than summed.
    pub fn count(self) -> usize {
        self.inline.max(self.bullet)
    }
}

pub fn count_acceptance_criteria(text: &str) -> AcceptanceCriteria {
    AcceptanceCriteria {
        inline: INLINE_ACCEPTANCE.find_iter(text).count(),
        bullet: BULLET_ACCEPTANCE.find_iter(text).count(),
    }
}

/// Matches only unnumbered headings such as "## Risks" or "# Constraints".
pub fn has_dependency_section(text: &str) -> bool {
    DEPENDENCY_SECTION.is_match(text)
}
