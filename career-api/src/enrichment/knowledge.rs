//! Curated career knowledge table
//!
//! Hand-written profiles for every career in the catalog. Lookups are
//! case-insensitive and tolerate near-miss spellings ("Data Scientst").

use std::collections::BTreeSet;

use career_common::catalog::normalize_career;
use career_common::{CareerProfile, WorkLifeBalance};

/// Minimum Jaro-Winkler similarity for a fuzzy hit
pub const FUZZY_THRESHOLD: f64 = 0.92;

/// Maximum character edits for a fuzzy hit
pub const MAX_SPELLING_EDITS: usize = 2;

struct Entry {
    name: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    salary_range: &'static str,
    education: &'static str,
    difficulty: f64,
    job_outlook: &'static str,
    day_to_day: &'static str,
    advancement: &'static str,
    balance: (f64, &'static str),
    pros: &'static [&'static str],
    cons: &'static [&'static str],
}

const TABLE: &[Entry] = &[
    Entry {
        name: "Software Engineer",
        description: "Designs, builds and maintains software systems, from user-facing applications to backend services.",
        skills: &["Programming", "Algorithms", "System Design", "Version Control", "Problem Solving"],
        salary_range: "$70,000 - $180,000",
        education: "Bachelor's degree in Computer Science or a related field; strong portfolios can substitute",
        difficulty: 7.0,
        job_outlook: "Strong growth driven by demand for software across every industry",
        day_to_day: "Writing and reviewing code, debugging, planning features with product teams",
        advancement: "Senior engineer, staff or principal engineer, engineering manager",
        balance: (7.0, "Often flexible hours and remote work, with occasional on-call or deadline pressure"),
        pros: &["High earning potential", "Remote-friendly", "Constant learning"],
        cons: &["Rapidly changing tools", "Long screen time", "Deadline crunches"],
    },
    Entry {
        name: "Data Scientist",
        description: "Extracts insight from data using statistics, machine learning and visualization to guide decisions.",
        skills: &["Statistics", "Programming", "Machine Learning", "Data Visualization", "Problem Solving"],
        salary_range: "$80,000 - $170,000",
        education: "Bachelor's degree in Statistics, Mathematics or Computer Science; many roles prefer a Master's",
        difficulty: 8.0,
        job_outlook: "Much faster than average growth as organisations adopt data-driven practices",
        day_to_day: "Cleaning data, building models, running experiments, presenting findings",
        advancement: "Senior or lead data scientist, machine learning engineer, head of analytics",
        balance: (7.0, "Mostly regular hours; project deadlines can add pressure"),
        pros: &["High demand", "Intellectually challenging", "Impact on decisions"],
        cons: &["Messy data consumes time", "Ambiguous problem statements", "Continuous upskilling needed"],
    },
    Entry {
        name: "Doctor",
        description: "Diagnoses and treats illness and injury, and promotes patient health across a medical specialty.",
        skills: &["Biology", "Chemistry", "Clinical Reasoning", "Communication", "Empathy"],
        salary_range: "$150,000 - $350,000",
        education: "Medical degree followed by residency; specialties require additional fellowship training",
        difficulty: 10.0,
        job_outlook: "Steady demand driven by ageing populations",
        day_to_day: "Seeing patients, ordering and interpreting tests, coordinating care",
        advancement: "Specialist, attending physician, department head",
        balance: (4.0, "Long shifts and on-call duties, especially during training"),
        pros: &["Meaningful work", "High respect", "Excellent earnings"],
        cons: &["Very long training", "High stress", "Irregular hours"],
    },
    Entry {
        name: "Mechanical Engineer",
        description: "Designs and tests mechanical devices, engines, tools and machines.",
        skills: &["Physics", "Mathematics", "CAD", "Thermodynamics", "Problem Solving"],
        salary_range: "$65,000 - $130,000",
        education: "Bachelor's degree in Mechanical Engineering; professional licensure for senior roles",
        difficulty: 7.0,
        job_outlook: "Stable demand across manufacturing, energy and automotive sectors",
        day_to_day: "Modelling designs, running simulations, supervising prototypes and tests",
        advancement: "Senior engineer, project lead, engineering manager",
        balance: (7.0, "Generally regular hours with some site visits"),
        pros: &["Tangible results", "Broad industry choice", "Solid pay"],
        cons: &["Licensing hurdles", "Project-based pressure", "Some roles tied to plant locations"],
    },
    Entry {
        name: "Teacher",
        description: "Plans and delivers lessons, assesses progress and supports students' development.",
        skills: &["Communication", "Subject Expertise", "Classroom Management", "Empathy", "Planning"],
        salary_range: "$40,000 - $80,000",
        education: "Bachelor's degree plus a teaching qualification or certification",
        difficulty: 6.0,
        job_outlook: "Consistent demand, with shortages in science and mathematics",
        day_to_day: "Teaching classes, grading work, meeting parents, preparing materials",
        advancement: "Department head, curriculum coordinator, school administrator",
        balance: (6.0, "School holidays offset evening grading and preparation"),
        pros: &["Shapes young lives", "Holidays", "Job security"],
        cons: &["Modest pay", "Heavy workload outside class", "Emotionally demanding"],
    },
    Entry {
        name: "Lawyer",
        description: "Advises clients on legal matters and represents them in negotiations and court.",
        skills: &["Critical Thinking", "Research", "Writing", "Communication", "Negotiation"],
        salary_range: "$60,000 - $200,000",
        education: "Law degree and admission to the bar",
        difficulty: 8.0,
        job_outlook: "Average growth; competition for top firms is intense",
        day_to_day: "Researching cases, drafting documents, meeting clients, appearing in court",
        advancement: "Senior associate, partner, judge",
        balance: (4.0, "Billable-hour targets often mean long weeks"),
        pros: &["Prestige", "High earning ceiling", "Intellectual challenge"],
        cons: &["Long hours", "Adversarial work", "Costly education"],
    },
    Entry {
        name: "Business Analyst",
        description: "Bridges business needs and technical teams by analysing processes and defining requirements.",
        skills: &["Data Analysis", "Communication", "Requirements Gathering", "Problem Solving", "Planning"],
        salary_range: "$60,000 - $120,000",
        education: "Bachelor's degree in Business, Economics or Information Systems",
        difficulty: 5.0,
        job_outlook: "Faster than average growth as organisations modernise",
        day_to_day: "Interviewing stakeholders, mapping processes, writing specifications",
        advancement: "Senior analyst, product manager, consultant",
        balance: (8.0, "Predictable office hours in most organisations"),
        pros: &["Varied industries", "People-facing", "Good entry point into tech"],
        cons: &["Caught between teams", "Shifting requirements", "Meeting-heavy"],
    },
    Entry {
        name: "Research Scientist",
        description: "Conducts experiments and studies to advance knowledge in a scientific field.",
        skills: &["Research", "Statistics", "Writing", "Critical Thinking", "Laboratory Techniques"],
        salary_range: "$60,000 - $150,000",
        education: "Doctorate in the research field is typical",
        difficulty: 9.0,
        job_outlook: "Competitive; tied to research funding",
        day_to_day: "Designing experiments, analysing results, writing papers and grants",
        advancement: "Senior scientist, principal investigator, research director",
        balance: (6.0, "Flexible schedules, but experiments and grant deadlines intrude"),
        pros: &["Discovery", "Autonomy", "Global collaboration"],
        cons: &["Funding insecurity", "Long training", "Slow progress"],
    },
    Entry {
        name: "Accountant",
        description: "Prepares and examines financial records, ensuring accuracy and compliance.",
        skills: &["Mathematics", "Attention to Detail", "Financial Reporting", "Data Analysis", "Ethics"],
        salary_range: "$50,000 - $110,000",
        education: "Bachelor's degree in Accounting; professional certification for advancement",
        difficulty: 5.0,
        job_outlook: "Steady demand from regulation and business growth",
        day_to_day: "Reconciling accounts, preparing statements and tax returns, auditing",
        advancement: "Senior accountant, controller, finance director",
        balance: (7.0, "Regular hours outside of tax and reporting seasons"),
        pros: &["Job stability", "Clear career path", "Transferable skills"],
        cons: &["Seasonal crunch", "Repetitive tasks", "Automation pressure"],
    },
    Entry {
        name: "Graphic Designer",
        description: "Creates visual concepts that communicate ideas through layout, typography and imagery.",
        skills: &["Creativity", "Typography", "Design Software", "Communication", "Visual Composition"],
        salary_range: "$40,000 - $90,000",
        education: "Bachelor's degree in Graphic Design or a strong portfolio",
        difficulty: 5.0,
        job_outlook: "Slower growth in print, rising demand in digital media",
        day_to_day: "Meeting clients, sketching concepts, producing and revising designs",
        advancement: "Senior designer, art director, creative director",
        balance: (7.0, "Freelance flexibility, with client deadlines"),
        pros: &["Creative work", "Freelance options", "Visible output"],
        cons: &["Subjective feedback", "Competitive market", "Variable income"],
    },
];

impl Entry {
    fn to_profile(&self) -> CareerProfile {
        CareerProfile {
            description: self.description.to_string(),
            skills: to_set(self.skills),
            salary_range: self.salary_range.to_string(),
            education: self.education.to_string(),
            difficulty: self.difficulty,
            job_outlook: self.job_outlook.to_string(),
            day_to_day: self.day_to_day.to_string(),
            advancement: self.advancement.to_string(),
            work_life_balance: WorkLifeBalance {
                rating: self.balance.0,
                explanation: self.balance.1.to_string(),
            },
            pros: to_vec(self.pros),
            cons: to_vec(self.cons),
        }
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn find(name: &str) -> Option<&'static Entry> {
    let wanted = normalize_career(name);
    if wanted.is_empty() {
        return None;
    }

    if let Some(entry) = TABLE.iter().find(|e| normalize_career(e.name) == wanted) {
        return Some(entry);
    }

    let words = wanted.split(' ').count();
    TABLE
        .iter()
        .filter_map(|e| {
            let known = normalize_career(e.name);
            is_misspelling(&known, &wanted, words)
                .then(|| (e, strsim::jaro_winkler(&known, &wanted)))
        })
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(e, _)| e)
}

/// Same word count and only a couple of character edits apart
fn is_misspelling(known: &str, wanted: &str, wanted_words: usize) -> bool {
    known.split(' ').count() == wanted_words
        && strsim::levenshtein(known, wanted) <= MAX_SPELLING_EDITS
}

/// Curated profile and its canonical career name
pub fn lookup(name: &str) -> Option<(&'static str, CareerProfile)> {
    find(name).map(|e| (e.name, e.to_profile()))
}

/// Core skills for a known career
pub fn skills_for(name: &str) -> Option<BTreeSet<String>> {
    find(name).map(|e| to_set(e.skills))
}

/// Generic, well-formed profile for careers outside the table
pub fn generic_profile(career: &str) -> CareerProfile {
    let career = career.trim();
    let career = if career.is_empty() { "This career" } else { career };

    CareerProfile {
        description: format!(
            "{} is a professional path. Detailed information is not available right now; \
             speak with practitioners and career advisors to learn more.",
            career
        ),
        skills: to_set(&["Communication", "Problem Solving", "Teamwork", "Time Management"]),
        salary_range: "Varies by region and experience".to_string(),
        education: "Requirements vary; a relevant degree or vocational qualification is common".to_string(),
        difficulty: 5.0,
        job_outlook: "Depends on industry and location".to_string(),
        day_to_day: "Varies by employer and specialisation".to_string(),
        advancement: "Progression typically follows experience and further qualifications".to_string(),
        work_life_balance: WorkLifeBalance {
            rating: 5.0,
            explanation: "Varies by employer".to_string(),
        },
        pros: to_vec(&["Opportunity to build transferable skills"]),
        cons: to_vec(&["Limited information available to plan with"]),
    }
}
