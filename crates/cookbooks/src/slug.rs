use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, ValueObject};

/// URL-friendly cookbook handle derived from its name.
///
/// ASCII lowercase letters and digits separated by single `-`; never empty,
/// never starting or ending with `-`. Deriving a slug from a slug is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl ValueObject for Slug {}

impl Slug {
    /// Derive a slug from a display name.
    ///
    /// Non-ASCII letters are transliterated ("Café" → `cafe`), apostrophes are
    /// dropped ("Mom's Pies" → `moms-pies`), and every other run of
    /// non-alphanumeric characters becomes one `-`.
    pub fn from_name(name: &str) -> DomainResult<Self> {
        let mut builder = SlugBuilder::default();

        for ch in name.chars() {
            if ch.is_ascii() {
                builder.push(ch);
                continue;
            }
            match deunicode::deunicode_char(ch) {
                Some(folded) => folded.chars().for_each(|c| builder.push(c)),
                None => builder.push(' '),
            }
        }

        if builder.out.is_empty() {
            return Err(DomainError::validation(format!(
                "name '{name}' does not produce a usable slug"
            )));
        }
        Ok(Self(builder.out))
    }

    /// Accept an already-derived slug as stored, without re-deriving it.
    pub fn from_stored(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if !is_well_formed(&raw) {
            return Err(DomainError::validation(format!("'{raw}' is not a valid slug")));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct SlugBuilder {
    out: String,
    pending_separator: bool,
}

impl SlugBuilder {
    fn push(&mut self, ch: char) {
        if ch == '\'' || ch == '\u{2019}' {
            return;
        }
        if ch.is_ascii_alphanumeric() {
            if self.pending_separator && !self.out.is_empty() {
                self.out.push('-');
            }
            self.pending_separator = false;
            self.out.push(ch.to_ascii_lowercase());
        } else {
            self.pending_separator = true;
        }
    }
}

fn is_well_formed(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.chars().all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit())
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_stored(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(Slug::from_name("Weeknight Dinners").unwrap().as_str(), "weeknight-dinners");
    }

    #[test]
    fn collapses_punctuation_runs_and_trims_edges() {
        assert_eq!(Slug::from_name("  --Soups & Stews!!  ").unwrap().as_str(), "soups-stews");
    }

    #[test]
    fn drops_apostrophes() {
        assert_eq!(Slug::from_name("Grandma's Pies").unwrap().as_str(), "grandmas-pies");
        assert_eq!(Slug::from_name("Grandma\u{2019}s Pies").unwrap().as_str(), "grandmas-pies");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(Slug::from_name("30 Minute Meals").unwrap().as_str(), "30-minute-meals");
    }

    #[test]
    fn transliterates_accents_to_ascii() {
        assert_eq!(Slug::from_name("Café Crème").unwrap().as_str(), "cafe-creme");
        assert_eq!(Slug::from_name("Smørrebrød").unwrap().as_str(), "smorrebrod");
    }

    #[test]
    fn dotted_capital_i_slugs_stably() {
        let slug = Slug::from_name("İstanbul Eats").unwrap();
        assert!(slug.as_str().is_ascii());
        assert_eq!(Slug::from_name(slug.as_str()).unwrap(), slug);
        assert_eq!(Slug::from_stored(slug.as_str()).unwrap(), slug);
    }

    #[test]
    fn rejects_names_without_alphanumerics() {
        assert!(matches!(Slug::from_name(" -- !! "), Err(DomainError::Validation(_))));
        assert!(matches!(Slug::from_name(""), Err(DomainError::Validation(_))));
    }

    #[test]
    fn from_stored_keeps_text_and_rejects_malformed() {
        assert_eq!(Slug::from_stored("sunday-roasts").unwrap().as_str(), "sunday-roasts");
        for bad in ["", "-soups", "soups-", "soups--stews", "Soups", "café"] {
            assert!(Slug::from_stored(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn deserialize_validates_shape() {
        let ok: Slug = serde_json::from_str("\"holiday-baking\"").unwrap();
        assert_eq!(ok.as_str(), "holiday-baking");
        assert!(serde_json::from_str::<Slug>("\"Holiday Baking\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"holiday-baking\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        #[test]
        fn slug_shape_holds(name in "\\PC{0,60}") {
            if let Ok(slug) = Slug::from_name(&name) {
                let s = slug.as_str();
                prop_assert!(!s.is_empty());
                prop_assert!(!s.starts_with('-'));
                prop_assert!(!s.ends_with('-'));
                prop_assert!(!s.contains("--"));
                prop_assert!(s.chars().all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()));
            }
        }

        #[test]
        fn slugging_a_slug_is_identity(name in "\\PC{1,40}") {
            if let Ok(slug) = Slug::from_name(&name) {
                let again = Slug::from_name(slug.as_str()).unwrap();
                prop_assert_eq!(&again, &slug);
                prop_assert_eq!(Slug::from_stored(slug.as_str()).unwrap(), slug);
            }
        }
    }
}
