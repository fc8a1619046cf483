//! Profile Store: read-only exam catalog loaded once at startup.
//!
//! Job postings, grading-board profiles, subject axes and posting blocks all
//! come from JSON files in `DATA_DIR`. Nothing here is mutated after load.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

pub mod handlers;

const POSTINGS_FILE: &str = "vagas.json";
const PROFILES_FILE: &str = "perfis_bancas.json";
const SUBJECTS_FILE: &str = "eixos.json";
const BLOCKS_FILE: &str = "blocos.json";

/// A job posting ("vaga") and the subjects its exam covers, in exam order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub titulo: String,
    pub bloco_id: String,
    pub disciplinas: Vec<String>,
}

/// Stylistic profile of a grading board ("banca").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardProfile {
    pub nome: String,
    pub instrucoes: Vec<String>,
    #[serde(default)]
    pub exemplos: Vec<ExampleQuestion>,
}

/// Few-shot example. `questao` is kept as raw JSON and echoed into prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleQuestion {
    pub disciplina: String,
    pub questao: serde_json::Value,
}

/// Subject axis ("eixo").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub nome: String,
}

/// Grouping of job postings ("bloco").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    postings: Vec<JobPosting>,
    profiles: BTreeMap<String, BoardProfile>,
    subjects: Vec<Subject>,
    blocks: Vec<Block>,
}

impl Catalog {
    /// Reads all four catalog files from `dir`. Any missing or malformed file is fatal.
    pub fn load(dir: &Path) -> Result<Self> {
        let catalog = Self::from_parts(
            read_json(dir, POSTINGS_FILE)?,
            read_json(dir, PROFILES_FILE)?,
            read_json(dir, SUBJECTS_FILE)?,
            read_json(dir, BLOCKS_FILE)?,
        )?;

        info!(
            "Catalog loaded from {}: {} postings, {} boards, {} subjects, {} blocks",
            dir.display(),
            catalog.postings.len(),
            catalog.profiles.len(),
            catalog.subjects.len(),
            catalog.blocks.len()
        );
        Ok(catalog)
    }

    pub fn from_parts(
        postings: Vec<JobPosting>,
        profiles: BTreeMap<String, BoardProfile>,
        subjects: Vec<Subject>,
        blocks: Vec<Block>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for posting in &postings {
            if !seen.insert(posting.id.as_str()) {
                bail!("Duplicate job posting id '{}'", posting.id);
            }
            if posting.disciplinas.is_empty() {
                bail!("Job posting '{}' lists no subjects", posting.id);
            }
        }

        Ok(Self {
            postings,
            profiles,
            subjects,
            blocks,
        })
    }

    pub fn posting(&self, id: &str) -> Option<&JobPosting> {
        self.postings.iter().find(|p| p.id == id)
    }

    /// All postings, or only those of `block_id` when given.
    pub fn postings(&self, block_id: Option<&str>) -> Vec<&JobPosting> {
        self.postings
            .iter()
            .filter(|p| block_id.map_or(true, |b| p.bloco_id == b))
            .collect()
    }

    pub fn profile(&self, board: &str) -> Option<&BoardProfile> {
        self.profiles.get(board)
    }

    /// Board keys in sorted order.
    pub fn boards(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed catalog file {}", path.display()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postings_filter_by_block() {
        let catalog = fixtures::catalog();
        assert_eq!(catalog.postings(None).len(), 2);
        let block_two = catalog.postings(Some("2"));
        assert_eq!(block_two.len(), 1);
        assert_eq!(block_two[0].id, "auditor");
        assert!(catalog.postings(Some("99")).is_empty());
    }

    #[test]
    fn test_profile_lookup_is_exact() {
        let catalog = fixtures::catalog();
        assert!(catalog.profile("CESGRANRIO").is_some());
        assert!(catalog.profile("cesgranrio").is_none());
        assert_eq!(catalog.boards(), vec!["CESGRANRIO"]);
    }

    #[test]
    fn test_duplicate_posting_ids_rejected() {
        let posting = JobPosting {
            id: "dup".to_string(),
            titulo: "T".to_string(),
            bloco_id: "1".to_string(),
            disciplinas: vec!["X".to_string()],
        };
        let result = Catalog::from_parts(
            vec![posting.clone(), posting],
            BTreeMap::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reads_all_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(POSTINGS_FILE),
            r#"[{"id": "v1", "titulo": "Vaga 1", "bloco_id": "1", "disciplinas": ["Ética"]}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(PROFILES_FILE),
            r#"{"FGV": {"nome": "FGV", "instrucoes": ["Seja direto."], "exemplos": []}}"#,
        )
        .unwrap();
        fs::write(dir.path().join(SUBJECTS_FILE), r#"[{"id": "e1", "nome": "Eixo 1"}]"#).unwrap();
        fs::write(dir.path().join(BLOCKS_FILE), r#"[{"id": "1", "nome": "Bloco 1"}]"#).unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.posting("v1").unwrap().disciplinas, vec!["Ética"]);
        assert_eq!(catalog.profile("FGV").unwrap().instrucoes.len(), 1);
        assert_eq!(catalog.subjects().len(), 1);
        assert_eq!(catalog.blocks()[0].nome, "Bloco 1");
    }

    #[test]
    fn test_load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(POSTINGS_FILE));
    }

    #[test]
    fn test_shipped_data_files_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = Catalog::load(&dir).unwrap();
        assert!(!catalog.boards().is_empty());
        for posting in catalog.postings(None) {
            assert!(
                catalog.blocks().iter().any(|b| b.id == posting.bloco_id),
                "posting {} points at unknown block {}",
                posting.id,
                posting.bloco_id
            );
        }
    }
}
