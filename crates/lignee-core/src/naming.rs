//! Rules for person names and titles entered in the editor.
//!
//! Names end up as Graphviz identifiers and HTML-like labels, so the characters that would
//! break either grammar are rejected up front.

use crate::{Error, Result};

pub const MAX_LEN: usize = 100;

const FORBIDDEN: &[char] = &[',', ';', ':', '"', '\\', '{', '}', '[', ']', '<', '>'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("must not be empty")]
    Empty,
    #[error("contains a character among , ; : \" \\ {{ }} [ ] < >")]
    ForbiddenCharacter,
    #[error("is longer than {MAX_LEN} characters")]
    TooLong,
    #[error("is already used in this generation")]
    Duplicate,
}

/// Checks a new person name against the names already present in its generation.
pub fn check_name<'a, I>(name: &str, generation_names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let violation = if name.trim().is_empty() {
        Some(RuleViolation::Empty)
    } else if name.contains(FORBIDDEN) {
        Some(RuleViolation::ForbiddenCharacter)
    } else if name.chars().count() > MAX_LEN {
        Some(RuleViolation::TooLong)
    } else if generation_names.into_iter().any(|n| n == name) {
        Some(RuleViolation::Duplicate)
    } else {
        None
    };

    match violation {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Titles may be empty (no title), but share the name length and character rules.
pub fn check_title(title: &str) -> Result<()> {
    let reason = if title.chars().count() > MAX_LEN {
        RuleViolation::TooLong
    } else if title.contains(FORBIDDEN) {
        RuleViolation::ForbiddenCharacter
    } else {
        return Ok(());
    };
    Err(Error::InvalidTitle {
        title: title.to_string(),
        reason,
    })
}
