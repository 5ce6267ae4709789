//! Line splitting and role classification.

use super::patterns::{BEST_BEFORE_DURATION, EXPIRY_LINE, MFG_LINE};

/// Semantic role of a classified line. Roles are not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// States a manufacturing or packing date.
    Mfg,
    /// Carries an explicit expiry/best-before/use-by phrase.
    ExpiryLabel,
    /// Carries a "best before N units" shelf-life phrase.
    BestBeforeDuration,
}

/// One normalized line of OCR text with its role tags.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    pub roles: Vec<Role>,
}

impl Line {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Split raw OCR text into normalized, role-tagged lines.
///
/// Empty lines are dropped, internal whitespace runs collapse to a single
/// space, and input order is preserved.
pub fn classify_lines(text: &str) -> Vec<Line> {
    text.lines()
        .map(|raw| raw.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .map(|text| {
            let roles = classify(&text);
            Line { text, roles }
        })
        .collect()
}

fn classify(line: &str) -> Vec<Role> {
    let mut roles = Vec::new();
    if MFG_LINE.is_match(line) {
        roles.push(Role::Mfg);
    }
    if EXPIRY_LINE.is_match(line) {
        roles.push(Role::ExpiryLabel);
    }
    if BEST_BEFORE_DURATION.is_match(line) {
        roles.push(Role::BestBeforeDuration);
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_normalization() {
        let lines = classify_lines("  EXP   12/2025  \n\n\t\nMFG\t01/01/2024");

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "EXP 12/2025");
        assert_eq!(lines[1].text, "MFG 01/01/2024");
    }

    #[test]
    fn test_role_tags() {
        let lines = classify_lines("PKD 01.01.2024\nUse by 15.08.2025\nBest before 6 months");

        assert_eq!(lines[0].roles, vec![Role::Mfg]);
        assert_eq!(lines[1].roles, vec![Role::ExpiryLabel]);
        // A shelf-life phrase is also expiry vocabulary.
        assert_eq!(
            lines[2].roles,
            vec![Role::ExpiryLabel, Role::BestBeforeDuration]
        );
    }

    #[test]
    fn test_roles_are_not_exclusive() {
        let lines = classify_lines("MFG 01/24 EXP 01/26");

        assert!(lines[0].has_role(Role::Mfg));
        assert!(lines[0].has_role(Role::ExpiryLabel));
    }

    #[test]
    fn test_vocabulary_is_whole_word() {
        let lines = classify_lines("manufacturing plant 7\nmanufactured 03/2024");

        assert!(lines[0].roles.is_empty());
        assert!(lines[1].has_role(Role::Mfg));
    }

    #[test]
    fn test_ocr_mangled_expiry_tokens() {
        for text in ["ESP 10/2025", "EXF 10/2025", "bbe 10/25", "b/b 10/25"] {
            let lines = classify_lines(text);
            assert!(lines[0].has_role(Role::ExpiryLabel), "{text} not tagged");
        }
    }

    #[test]
    fn test_order_preserved() {
        let lines = classify_lines("first\nsecond\nthird");
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
