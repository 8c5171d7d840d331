//! Pronoun resolution from the free-text pronoun hint on the intake form.

use serde::Serialize;

/// Grammatical forms used when writing about the individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PronounSet {
    pub subject: &'static str,
    pub object: &'static str,
    pub possessive: &'static str,
    pub reflexive: &'static str,
}

pub const HE: PronounSet = PronounSet {
    subject: "he",
    object: "him",
    possessive: "his",
    reflexive: "himself",
};

pub const SHE: PronounSet = PronounSet {
    subject: "she",
    object: "her",
    possessive: "her",
    reflexive: "herself",
};

pub const THEY: PronounSet = PronounSet {
    subject: "they",
    object: "them",
    possessive: "their",
    reflexive: "themselves",
};

impl PronounSet {
    /// Subject form with its first letter upper-cased, for sentence starts.
    pub fn subject_capitalised(&self) -> String {
        let mut chars = self.subject.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// "has"/"have" agreeing with the subject form.
    pub fn has(&self) -> &'static str {
        if *self == THEY {
            "have"
        } else {
            "has"
        }
    }
}

/// Maps a pronoun hint to a pronoun set. Total: anything unrecognised is they/them.
///
/// Only the leading classifier matters, so "she/her", "She" and "SHE/HER" all
/// resolve alike. The hint is lower-cased but not trimmed, so a leading space
/// falls through to they/them. The "he" check runs first, which means a hint
/// starting with "her" resolves to he/him.
pub fn resolve(hint: Option<&str>) -> PronounSet {
    let hint = hint.unwrap_or_default().to_lowercase();
    if hint.starts_with("he") {
        HE
    } else if hint.starts_with("she") {
        SHE
    } else {
        THEY
    }
}
