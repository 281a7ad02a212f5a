use crate::kind::ResourceKind;
use crate::record::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

#[derive(Debug)]
pub struct FieldSpec {
    /// Canonical key, also the key sent back to the API.
    pub key: &'static str,
    pub title: &'static str,
    /// Alternate spellings the backend has used for this field.
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub editable: bool,
    /// Shown as a list column (the remaining fields only appear in the edit form).
    pub column: bool,
}

const fn text(key: &'static str, title: &'static str, aliases: &'static [&'static str], column: bool) -> FieldSpec {
    FieldSpec { key, title, aliases, kind: FieldKind::Text, editable: true, column }
}

const fn integer(key: &'static str, title: &'static str, aliases: &'static [&'static str], column: bool) -> FieldSpec {
    FieldSpec { key, title, aliases, kind: FieldKind::Integer, editable: true, column }
}

#[derive(Debug)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub fields: &'static [FieldSpec],
    /// Field used as the primary label for filtering and confirmations.
    pub label_key: &'static str,
    pub has_category: bool,
}

pub static VOCABULARY: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Vocabularies,
    label_key: "word",
    has_category: true,
    fields: &[
        text("word", "Word", &[], true),
        text("pronunciation", "Pronunciation", &["phonetic"], true),
        text("partOfSpeech", "Part of speech", &["part_of_speech", "type"], true),
        text("definitionEn", "Definition (EN)", &["definition_en", "definition"], false),
        text("meaningVi", "Meaning (VI)", &["meaning_vi", "meaning"], true),
        text("exampleEn", "Example (EN)", &["example_en", "example"], false),
        text("exampleVi", "Example (VI)", &["example_vi"], false),
        text("image", "Image URL", &["imageUrl", "image_url"], false),
        text("audio", "Audio URL", &["audioUrl", "audio_url"], false),
    ],
};

const CATEGORY_FIELDS: &[FieldSpec] = &[
    text("name", "Name", &["title"], true),
    text("description", "Description", &[], true),
    text("type", "Type", &["category_type", "categoryType"], true),
    integer("orderIndex", "Order", &["order_index", "order"], true),
];

pub static VOCABULARY_CATEGORY: ResourceSchema = ResourceSchema {
    kind: ResourceKind::VocabularyCategories,
    label_key: "name",
    has_category: false,
    fields: CATEGORY_FIELDS,
};

pub static GRAMMAR_CATEGORY: ResourceSchema = ResourceSchema {
    kind: ResourceKind::GrammarCategories,
    label_key: "name",
    has_category: false,
    fields: CATEGORY_FIELDS,
};

pub static ARTICLE: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Articles,
    label_key: "title",
    has_category: false,
    fields: &[
        text("title", "Title", &["name"], true),
        text("content", "Content", &["body"], false),
        text("image", "Image URL", &["imageUrl", "image_url", "thumbnail"], true),
        text("audio", "Audio URL", &["audioUrl", "audio_url"], false),
    ],
};

pub static VIDEO: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Videos,
    label_key: "title",
    has_category: false,
    fields: &[
        text("title", "Title", &["name"], true),
        text("description", "Description", &[], false),
        text("url", "Video URL", &["videoUrl", "video_url", "link"], true),
        integer("duration", "Duration (s)", &["durationSeconds", "duration_seconds"], true),
        text("subtitle", "Subtitle", &["subtitles", "subtitleUrl"], false),
    ],
};

impl ResourceSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Maps a wire key onto its canonical key, if this schema knows it.
    pub fn canonical_key(&self, wire: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.key == wire || f.aliases.contains(&wire)).map(|f| f.key)
    }

    pub fn editable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.editable)
    }

    pub fn label(&self, record: &Record) -> String {
        record.text(self.label_key)
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["ID".to_string()];
        headers.extend(self.fields.iter().filter(|f| f.column).map(|f| f.title.to_uppercase()));
        if self.has_category {
            headers.push("CATEGORY".to_string());
        }
        headers.push("UPDATED".to_string());
        headers
    }

    pub fn row(&self, record: &Record) -> Vec<String> {
        let mut row = vec![record.id.to_string()];
        row.extend(self.fields.iter().filter(|f| f.column).map(|f| record.text(f.key)));
        if self.has_category {
            row.push(record.category.as_ref().map(|c| c.to_string()).unwrap_or_default());
        }
        row.push(record.audit.last_touched());
        row
    }
}
