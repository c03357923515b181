use core::str::FromStr;

use larder_core::CookBookId;

/// How a single cookbook is addressed in a lookup.
///
/// A path segment in canonical hyphenated UUID form is an id; anything else
/// (including the 32-hex, braced and `urn:` UUID spellings) is a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookBookKey {
    Id(CookBookId),
    Slug(String),
}

impl CookBookKey {
    pub fn parse(raw: &str) -> Self {
        if is_hyphenated_uuid(raw) {
            if let Ok(id) = CookBookId::from_str(raw) {
                return Self::Id(id);
            }
        }
        Self::Slug(raw.to_string())
    }

    /// Column/attribute the lookup matches on.
    pub fn match_attr(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Slug(_) => "slug",
        }
    }
}

fn is_hyphenated_uuid(raw: &str) -> bool {
    raw.len() == 36
        && raw.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

impl From<CookBookId> for CookBookKey {
    fn from(id: CookBookId) -> Self {
        Self::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segment_is_an_id_lookup() {
        let id = CookBookId::new();
        assert_eq!(CookBookKey::parse(&id.to_string()), CookBookKey::Id(id));
        assert_eq!(CookBookKey::parse(&id.to_string()).match_attr(), "id");
    }

    #[test]
    fn anything_else_is_a_slug_lookup() {
        let key = CookBookKey::parse("sunday-roasts");
        assert_eq!(key, CookBookKey::Slug("sunday-roasts".to_string()));
        assert_eq!(key.match_attr(), "slug");
    }

    #[test]
    fn other_uuid_spellings_are_slug_lookups() {
        let id = CookBookId::new();
        let simple = id.as_uuid().simple().to_string();
        let braced = id.as_uuid().braced().to_string();
        let urn = id.as_uuid().urn().to_string();

        for raw in [simple, braced, urn] {
            assert_eq!(CookBookKey::parse(&raw), CookBookKey::Slug(raw.clone()));
        }
    }

    #[test]
    fn uppercase_hyphenated_uuid_is_still_an_id() {
        let id = CookBookId::new();
        let upper = id.to_string().to_uppercase();
        assert_eq!(CookBookKey::parse(&upper), CookBookKey::Id(id));
    }

    #[test]
    fn near_uuid_text_stays_a_slug() {
        let key = CookBookKey::parse("0190e4c4-not-a-uuid");
        assert!(matches!(key, CookBookKey::Slug(_)));
    }
}
