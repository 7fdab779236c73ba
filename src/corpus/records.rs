use serde::{Deserialize, Deserializer};

use super::category::Category;

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_owned())
}

/// One source document of the corpus.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(deserialize_with = "trimmed")]
    pub source: String,
    #[serde(deserialize_with = "trimmed")]
    pub date: String,
    #[serde(deserialize_with = "trimmed")]
    pub text: String,
    #[serde(deserialize_with = "trimmed")]
    pub file: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EntityMention {
    #[serde(deserialize_with = "trimmed")]
    pub file: String,
    #[serde(deserialize_with = "trimmed")]
    pub entity: String,
    #[serde(deserialize_with = "trimmed")]
    pub entity_type: String,
}

impl EntityMention {
    pub fn new(file: &str, entity: &str, entity_type: &str) -> Self {
        Self {
            file: file.trim().to_owned(),
            entity: entity.trim().to_owned(),
            entity_type: entity_type.trim().to_owned(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_entity_type(&self.entity_type)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NounPhrase {
    #[serde(deserialize_with = "trimmed")]
    pub file: String,
    #[serde(deserialize_with = "trimmed")]
    pub phrase: String,
    #[serde(deserialize_with = "trimmed")]
    pub in_entity: String,
}

/// Pre-rendered NER markup for a file. Kept verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RenderFragment {
    #[serde(deserialize_with = "trimmed")]
    pub file: String,
    pub render: String,
}

#[derive(Clone, Debug, Default)]
pub struct Corpus {
    pub records: Vec<Record>,
    pub mentions: Vec<EntityMention>,
    pub noun_phrases: Vec<NounPhrase>,
    pub renders: Vec<RenderFragment>,
}

impl Corpus {
    pub fn record_for(&self, file: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.file == file)
    }

    pub fn renders_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a RenderFragment> {
        self.renders.iter().filter(move |render| render.file == file)
    }

    pub fn noun_phrases_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a NounPhrase> {
        self.noun_phrases
            .iter()
            .filter(move |phrase| phrase.file == file)
    }
}
