use std::fmt;
use std::str::FromStr;

use crate::schema::{self, ResourceSchema};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Vocabularies,
    VocabularyCategories,
    GrammarCategories,
    Articles,
    Videos,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        Self::Vocabularies,
        Self::VocabularyCategories,
        Self::GrammarCategories,
        Self::Articles,
        Self::Videos,
    ];

    /// Endpoint path segment below the admin base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Vocabularies => "vocabularies",
            Self::VocabularyCategories => "vocabulary-categories",
            Self::GrammarCategories => "grammar-categories",
            Self::Articles => "articles",
            Self::Videos => "videos",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Vocabularies => "vocab",
            Self::VocabularyCategories => "vcat",
            Self::GrammarCategories => "gcat",
            Self::Articles => "article",
            Self::Videos => "video",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vocabularies => "Vocabulary",
            Self::VocabularyCategories => "Vocabulary Categories",
            Self::GrammarCategories => "Grammar Categories",
            Self::Articles => "Articles",
            Self::Videos => "Videos",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Self::Vocabularies => "vocabulary entry",
            Self::VocabularyCategories => "vocabulary category",
            Self::GrammarCategories => "grammar category",
            Self::Articles => "article",
            Self::Videos => "video",
        }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        match self {
            Self::Vocabularies => &schema::VOCABULARY,
            Self::VocabularyCategories => &schema::VOCABULARY_CATEGORY,
            Self::GrammarCategories => &schema::GRAMMAR_CATEGORY,
            Self::Articles => &schema::ARTICLE,
            Self::Videos => &schema::VIDEO,
        }
    }

    /// The list a category row opens when selected, filtered by that category.
    pub fn drill_down(&self) -> Option<ResourceKind> {
        match self {
            Self::VocabularyCategories => Some(Self::Vocabularies),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|k| k.path() == needle || k.short_name() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.path()).collect();
                format!("unknown resource kind \"{s}\" (expected one of: {})", known.join(", "))
            })
    }
}
