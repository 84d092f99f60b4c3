//! The fixed 20-category semantic space (§3, §4.1 of the specification).
//!
//! Two coexisting identifier schemes: a *flat* id used by the permission
//! engine and storage layer, and an optional *ShortLex* id used by the
//! matrix report renderer. The flat space is the only one the permission
//! engine contract requires; ShortLex exists purely for matrix/report
//! validators (`isShortLexOrdered`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of categories in the fixed space. Never changes at runtime.
pub const CATEGORY_COUNT: usize = 20;

/// One entry of the fixed category space, pairing a flat identifier with
/// its ShortLex counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Security,
    Reliability,
    DataIntegrity,
    ProcessAdherence,
    CodeQuality,
    Testing,
    Documentation,
    Communication,
    TimeManagement,
    ResourceEfficiency,
    RiskAssessment,
    Compliance,
    Innovation,
    Collaboration,
    Accountability,
    Transparency,
    Adaptability,
    DomainExpertise,
    UserFocus,
    EthicalAlignment,
}

impl Category {
    /// All 20 categories, in their canonical (registration) order.
    pub const fn all() -> [Category; CATEGORY_COUNT] {
        [
            Self::Security,
            Self::Reliability,
            Self::DataIntegrity,
            Self::ProcessAdherence,
            Self::CodeQuality,
            Self::Testing,
            Self::Documentation,
            Self::Communication,
            Self::TimeManagement,
            Self::ResourceEfficiency,
            Self::RiskAssessment,
            Self::Compliance,
            Self::Innovation,
            Self::Collaboration,
            Self::Accountability,
            Self::Transparency,
            Self::Adaptability,
            Self::DomainExpertise,
            Self::UserFocus,
            Self::EthicalAlignment,
        ]
    }

    /// The flat identifier, e.g. `"data_integrity"`.
    pub const fn flat(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Reliability => "reliability",
            Self::DataIntegrity => "data_integrity",
            Self::ProcessAdherence => "process_adherence",
            Self::CodeQuality => "code_quality",
            Self::Testing => "testing",
            Self::Documentation => "documentation",
            Self::Communication => "communication",
            Self::TimeManagement => "time_management",
            Self::ResourceEfficiency => "resource_efficiency",
            Self::RiskAssessment => "risk_assessment",
            Self::Compliance => "compliance",
            Self::Innovation => "innovation",
            Self::Collaboration => "collaboration",
            Self::Accountability => "accountability",
            Self::Transparency => "transparency",
            Self::Adaptability => "adaptability",
            Self::DomainExpertise => "domain_expertise",
            Self::UserFocus => "user_focus",
            Self::EthicalAlignment => "ethical_alignment",
        }
    }

    /// The default ShortLex id (parent letter `A`-`E`, child suffix `.1`-`.4`).
    /// Configuration may override this mapping (see `config::CategoryOverrides`).
    pub const fn shortlex(&self) -> &'static str {
        match self {
            Self::Security => "A.1",
            Self::Reliability => "A.2",
            Self::DataIntegrity => "A.3",
            Self::ProcessAdherence => "A.4",
            Self::CodeQuality => "B.1",
            Self::Testing => "B.2",
            Self::Documentation => "B.3",
            Self::Communication => "B.4",
            Self::TimeManagement => "C.1",
            Self::ResourceEfficiency => "C.2",
            Self::RiskAssessment => "C.3",
            Self::Compliance => "C.4",
            Self::Innovation => "D.1",
            Self::Collaboration => "D.2",
            Self::Accountability => "D.3",
            Self::Transparency => "D.4",
            Self::Adaptability => "E.1",
            Self::DomainExpertise => "E.2",
            Self::UserFocus => "E.3",
            Self::EthicalAlignment => "E.4",
        }
    }

    /// Parse a flat identifier back into a `Category`.
    pub fn from_flat(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.flat() == s)
    }

    /// Parse a ShortLex identifier back into a `Category`.
    pub fn from_shortlex(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.shortlex() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flat())
    }
}

/// Returns `listCategories()` — all 20 flat identifiers, canonical order.
pub fn list_categories() -> [&'static str; CATEGORY_COUNT] {
    let mut out = [""; CATEGORY_COUNT];
    for (i, c) in Category::all().into_iter().enumerate() {
        out[i] = c.flat();
    }
    out
}

/// ShortLex ordering rule: shorter strings precede longer; within equal
/// length, alphabetical. Generic over any sequence of string-like ids so
/// it can validate both the 20-category flat space and a 45×45
/// sub-category matrix (§9: "expose the 45-variant only if the ShortLex
/// sub-category set is provided").
pub fn is_shortlex_ordered<S: AsRef<str>>(seq: &[S]) -> bool {
    seq.windows(2).all(|pair| {
        let a = pair[0].as_ref();
        let b = pair[1].as_ref();
        shortlex_le(a, b)
    })
}

/// `a <= b` under the ShortLex total order.
pub fn shortlex_le(a: &str, b: &str) -> bool {
    match a.len().cmp(&b.len()) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => a <= b,
    }
}

/// Letter grade boundaries from §3: `A∈[0,500]`, `B∈[501,1500]`,
/// `C∈[1501,3000]`, `D∈[3001,∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        f.write_str(s)
    }
}

/// Maps an integer Trust-Debt unit count to its letter grade. Boundaries
/// are inclusive on both ends per §3/P12: `units=0→A`, `500→A`, `501→B`,
/// `1500→B`, `1501→C`, `3000→C`, `3001→D`.
pub fn grade_of(units: i64) -> Grade {
    match units {
        u if u <= 500 => Grade::A,
        501..=1500 => Grade::B,
        1501..=3000 => Grade::C,
        _ => Grade::D,
    }
}

/// Top of grade C — the calibration point used by identity projection
/// (`unitsToScore`) and the drift model (`sovereignty_raw`). See §4.2/§4.3.
pub const MAX_TRUST_DEBT_UNITS: f64 = 3000.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_twenty_unique_flat_ids() {
        let all = Category::all();
        assert_eq!(all.len(), CATEGORY_COUNT);
        let mut flats: Vec<_> = all.iter().map(|c| c.flat()).collect();
        flats.sort_unstable();
        flats.dedup();
        assert_eq!(flats.len(), CATEGORY_COUNT);
    }

    #[test]
    fn flat_and_shortlex_round_trip() {
        for c in Category::all() {
            assert_eq!(Category::from_flat(c.flat()), Some(c));
            assert_eq!(Category::from_shortlex(c.shortlex()), Some(c));
        }
    }

    #[test]
    fn canonical_shortlex_sequence_is_ordered() {
        let seq: Vec<&str> = Category::all().iter().map(|c| c.shortlex()).collect();
        assert!(is_shortlex_ordered(&seq));
    }

    #[test]
    fn shortlex_length_before_lex() {
        // "A" is shorter than "A.1" so it must sort first even though 'A' > nothing.
        assert!(shortlex_le("A", "A.1"));
        assert!(!shortlex_le("B.1", "A"));
    }

    // P12
    #[test]
    fn grade_boundaries_are_exact() {
        assert_eq!(grade_of(0), Grade::A);
        assert_eq!(grade_of(500), Grade::A);
        assert_eq!(grade_of(501), Grade::B);
        assert_eq!(grade_of(1500), Grade::B);
        assert_eq!(grade_of(1501), Grade::C);
        assert_eq!(grade_of(3000), Grade::C);
        assert_eq!(grade_of(3001), Grade::D);
        assert_eq!(grade_of(1_000_000), Grade::D);
    }
}
