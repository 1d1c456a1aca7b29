use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::model::{ResultEntity, ResultKind};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate result id: {0}")]
    DuplicateId(String),
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse corpus {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// The immutable, ordered set of candidates for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    entities: Vec<ResultEntity>,
}

impl ResultStore {
    pub fn new(entities: Vec<ResultEntity>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if !seen.insert(entity.id.as_str()) {
                return Err(StoreError::DuplicateId(entity.id.clone()));
            }
        }
        Ok(Self { entities })
    }

    /// Reads a JSON5 array of entities. Comments and trailing commas are fine.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    pub fn parse(raw: &str, origin: &Path) -> Result<Self, StoreError> {
        let entities: Vec<ResultEntity> =
            json5::from_str(raw).map_err(|error| StoreError::Parse {
                path: origin.to_path_buf(),
                message: error.to_string(),
            })?;
        let store = Self::new(entities)?;
        tracing::info!(
            path = %origin.display(),
            entities = store.len(),
            "loaded result corpus"
        );
        Ok(store)
    }

    pub fn sample() -> Self {
        Self {
            entities: sample_entities(),
        }
    }

    pub fn entities(&self) -> &[ResultEntity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&ResultEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn sample_entities() -> Vec<ResultEntity> {
    vec![
        ResultEntity::new("1", ResultKind::Person, "Caroline Dribsson")
            .with_subtitle("Unactivated")
            .with_avatar(
                "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=40&h=40&fit=crop&crop=face",
                false,
            ),
        ResultEntity::new("2", ResultKind::Person, "Javier Alaves")
            .with_subtitle("Active")
            .with_avatar(
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=40&h=40&fit=crop&crop=face",
                true,
            ),
        ResultEntity::new("3", ResultKind::Image, "creative_file_frankies.jpg")
            .with_subtitle("in Photos/Assets")
            .with_metadata("Edited 12m ago")
            .with_link("https://example.com/creative_file_frankies.jpg"),
        ResultEntity::new("4", ResultKind::Video, "Dribbble Video.mp4")
            .with_subtitle("in Dribbble Folder")
            .with_metadata("Edited 5m ago")
            .with_file_size("15.2 MB"),
        ResultEntity::new("5", ResultKind::File, "Dribbble Design.fig")
            .with_subtitle("in Dribbble Folder")
            .with_metadata("Edited 1h ago")
            .with_file_size("8.1 MB"),
        ResultEntity::new("6", ResultKind::Folder, "Dribbble Folder")
            .with_subtitle("in Projects")
            .with_metadata("Edited 2m ago")
            .with_file_count(12),
    ]
}
