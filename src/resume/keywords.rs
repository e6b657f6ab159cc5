use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::error::AppError;

/// Technology vocabulary: canonical name and the surface forms that count
/// as a mention. Patterns are regex fragments matched case-insensitively
/// on whole words.
pub const TECH_VOCABULARY: &[(&str, &[&str])] = &[
    // Frontend
    ("Angular", &["Angular"]),
    ("React", &["React"]),
    ("Vue.js", &[r"Vue\.js"]),
    ("Svelte", &["Svelte"]),
    ("Next.js", &[r"Next\.js"]),
    ("Gatsby", &["Gatsby"]),
    ("jQuery", &["jQuery"]),
    ("D3.js", &[r"D3\.js"]),
    // Backend frameworks
    ("Spring Boot", &[r"Spring\s+Boot"]),
    ("Django", &["Django"]),
    ("Flask", &["Flask"]),
    ("Laravel", &["Laravel"]),
    ("Ruby on Rails", &[r"Ruby\s+on\s+Rails"]),
    ("ASP.NET", &[r"ASP\.NET"]),
    ("Express", &["Express"]),
    ("Symfony", &["Symfony"]),
    ("FastAPI", &["FastAPI"]),
    ("Node.js", &[r"Node\.js"]),
    // Languages
    ("Java", &["Java"]),
    ("Python", &["Python"]),
    ("C++", &[r"C\+\+"]),
    ("C#", &["C#"]),
    ("Ruby", &["Ruby"]),
    ("PHP", &["PHP"]),
    ("Go", &["Go"]),
    ("Rust", &["Rust"]),
    ("Swift", &["Swift"]),
    ("Kotlin", &["Kotlin"]),
    ("TypeScript", &["TypeScript"]),
    ("JavaScript", &["JavaScript"]),
    // Datastores
    ("MongoDB", &["MongoDB"]),
    ("MySQL", &["MySQL"]),
    ("PostgreSQL", &["PostgreSQL"]),
    ("Oracle", &["Oracle"]),
    ("SQL Server", &[r"SQL\s+Server"]),
    ("Redis", &["Redis"]),
    ("Cassandra", &["Cassandra"]),
    ("DynamoDB", &["DynamoDB"]),
    // Infrastructure
    ("Docker", &["Docker"]),
    ("Kubernetes", &["Kubernetes"]),
    ("AWS", &["AWS"]),
    ("Azure", &["Azure"]),
    ("GCP", &["GCP"]),
    ("Terraform", &["Terraform"]),
    ("Ansible", &["Ansible"]),
    ("Jenkins", &["Jenkins"]),
    ("Git", &["Git"]),
    // Data and ML
    ("TensorFlow", &["TensorFlow"]),
    ("PyTorch", &["PyTorch"]),
    ("Scikit-learn", &["Scikit-learn"]),
    ("Keras", &["Keras"]),
    ("Pandas", &["Pandas"]),
    ("NumPy", &["NumPy"]),
    ("Matplotlib", &["Matplotlib"]),
    ("OpenCV", &["OpenCV"]),
    ("NLTK", &["NLTK"]),
    ("SpaCy", &["SpaCy"]),
];

pub struct KeywordExtractor {
    terms: Vec<(String, Regex)>,
}

impl KeywordExtractor {
    pub fn new(vocabulary: &[(&str, &[&str])]) -> Result<Self, AppError> {
        let terms = vocabulary
            .iter()
            .map(|(canonical, patterns)| -> Result<(String, Regex), AppError> {
                let alternation = patterns
                    .iter()
                    .map(|p| bounded(p))
                    .collect::<Vec<_>>()
                    .join("|");
                let regex = RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()?;
                Ok((title_case(canonical), regex))
            })
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(Self { terms })
    }

    pub fn with_default_vocabulary() -> Result<Self, AppError> {
        Self::new(TECH_VOCABULARY)
    }

    /// Title-cased names of every vocabulary entry mentioned in `text`,
    /// sorted and deduplicated.
    pub fn extract_terms(&self, text: &str) -> BTreeSet<String> {
        self.terms
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Wrap a pattern in word boundaries. A `\b` next to a symbol such as the
/// `+` of `C++` would require a word character on the far side, so symbol
/// edges are bounded by "non-word or end of text" instead.
fn bounded(pattern: &str) -> String {
    let starts_with_word = pattern
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    let ends_with_word = pattern
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');

    let head = if starts_with_word { r"\b" } else { r"(?:^|\W)" };
    let tail = if ends_with_word { r"\b" } else { r"(?:\W|$)" };
    format!("{head}(?:{pattern}){tail}")
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Append a user-supplied keyword unless it is blank or already present.
pub fn add_keyword(keywords: &mut Vec<String>, candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || keywords.iter().any(|k| k == candidate) {
        return false;
    }
    keywords.push(candidate.to_string());
    true
}
