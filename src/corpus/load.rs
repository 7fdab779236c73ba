use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::records::Corpus;

pub const RECORDS_FILE: &str = "combined_data_with_nlp_features.csv";
pub const ENTITIES_FILE: &str = "entities.csv";
pub const NOUNS_FILE: &str = "nouns.csv";
pub const RENDERS_FILE: &str = "renders.csv";

pub fn load_corpus(data_dir: &Path) -> Result<Corpus> {
    let records = read_table(&data_dir.join(RECORDS_FILE))?;
    let mentions = read_table(&data_dir.join(ENTITIES_FILE))?;
    let noun_phrases = read_table(&data_dir.join(NOUNS_FILE))?;
    let renders = read_table(&data_dir.join(RENDERS_FILE))?;

    let corpus = Corpus {
        records,
        mentions,
        noun_phrases,
        renders,
    };

    if corpus.mentions.is_empty() {
        tracing::warn!("no entity mentions found in {}", data_dir.join(ENTITIES_FILE).display());
    }

    tracing::info!(
        records = corpus.records.len(),
        mentions = corpus.mentions.len(),
        noun_phrases = corpus.noun_phrases.len(),
        renders = corpus.renders.len(),
        "loaded corpus from {}",
        data_dir.display()
    );

    Ok(corpus)
}

/// Reads one CSV table. Rows that do not fit `T` are skipped, not fatal.
pub(super) fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<T>() {
        match row {
            Ok(row) => rows.push(row),
            Err(error) if error.is_io_error() => {
                return Err(error).with_context(|| format!("failed to read {}", path.display()));
            }
            Err(error) => {
                skipped += 1;
                tracing::trace!(%error, "skipping malformed row in {}", path.display());
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed rows in {}", path.display());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::corpus::records::{EntityMention, RenderFragment};

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join(RECORDS_FILE),
            "source,date,text,file\n cnn , 2020-01-01 , Alice went to Paris. ,f1.txt\n",
        )
        .unwrap();
        fs::write(
            dir.join(ENTITIES_FILE),
            "file,entity,entity_type\nf1.txt, Alice ,PERSON\nf1.txt,Paris,GPE\nbroken\nf1.txt,2020,DATE\n",
        )
        .unwrap();
        fs::write(
            dir.join(NOUNS_FILE),
            "file,phrase,in_entity\nf1.txt,the city,False\n",
        )
        .unwrap();
        fs::write(
            dir.join(RENDERS_FILE),
            "file,render\nf1.txt,\" <mark>Alice</mark> went \"\n",
        )
        .unwrap();
    }

    #[test]
    fn loads_all_tables_and_trims_fields() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let corpus = load_corpus(dir.path()).unwrap();

        assert_eq!(corpus.records.len(), 1);
        assert_eq!(corpus.records[0].source, "cnn");
        assert_eq!(corpus.records[0].text, "Alice went to Paris.");
        assert_eq!(corpus.mentions[0], EntityMention::new("f1.txt", "Alice", "PERSON"));
        assert_eq!(corpus.noun_phrases[0].phrase, "the city");
        assert_eq!(
            corpus.renders[0],
            RenderFragment {
                file: "f1.txt".to_owned(),
                render: " <mark>Alice</mark> went ".to_owned(),
            }
        );
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let corpus = load_corpus(dir.path()).unwrap();

        assert_eq!(corpus.mentions.len(), 3);
        assert_eq!(corpus.mentions[2].entity, "2020");
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::remove_file(dir.path().join(NOUNS_FILE)).unwrap();

        let error = load_corpus(dir.path()).unwrap_err();
        assert!(format!("{error:#}").contains(NOUNS_FILE));
    }

    #[test]
    fn table_without_mentions_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(dir.path().join(ENTITIES_FILE), "file,entity,entity_type\n").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert!(corpus.mentions.is_empty());
        assert_eq!(corpus.records.len(), 1);
    }

    #[test]
    fn table_of_only_malformed_rows_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(
            dir.path().join(ENTITIES_FILE),
            "file,entity,entity_type\nbroken\nalso-broken\n",
        )
        .unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert!(corpus.mentions.is_empty());
    }
}
