//! Fixed career catalog
//!
//! Used as the static fallback pool for predictions and as the candidate set
//! for alternative-career matching. Every entry has a curated record in the
//! service's knowledge table.

pub const CAREER_CATALOG: [&str; 10] = [
    "Software Engineer",
    "Data Scientist",
    "Doctor",
    "Mechanical Engineer",
    "Teacher",
    "Lawyer",
    "Business Analyst",
    "Research Scientist",
    "Accountant",
    "Graphic Designer",
];

/// Normalize a career name for comparisons: trimmed, lowercase, single spaces
pub fn normalize_career(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical catalog spelling for a career name, if it is in the catalog
pub fn canonical_career(name: &str) -> Option<&'static str> {
    let wanted = normalize_career(name);
    CAREER_CATALOG
        .iter()
        .copied()
        .find(|c| normalize_career(c) == wanted)
}

/// Catalog entries other than `career`
pub fn other_careers(career: &str) -> impl Iterator<Item = &'static str> + '_ {
    let excluded = normalize_career(career);
    CAREER_CATALOG
        .iter()
        .copied()
        .filter(move |c| normalize_career(c) != excluded)
}
