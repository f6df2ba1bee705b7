//! Restores the last committed query across runs.

use std::path::Path;

use catalog_core::{KindFilter, Query};
use catalog_engine::StateFile;
use engine_logging::{engine_error, engine_info, engine_warn};
use serde::{Deserialize, Serialize};

const SESSION_FILENAME: &str = ".catalog_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedQuery {
    text: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    genre: Option<String>,
}

fn session_file(state_dir: &Path) -> StateFile {
    StateFile::new(state_dir, SESSION_FILENAME)
}

pub(crate) fn load_query(state_dir: &Path) -> Option<Query> {
    let content = match session_file(state_dir).load() {
        Ok(Some(content)) => content,
        Ok(None) => return None,
        Err(err) => {
            engine_warn!("Failed to read session from {:?}: {}", state_dir, err);
            return None;
        }
    };

    let persisted: PersistedQuery = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(err) => {
            engine_warn!("Failed to parse session from {:?}: {}", state_dir, err);
            return None;
        }
    };

    let kind = persisted
        .kind
        .as_deref()
        .and_then(KindFilter::parse)
        .unwrap_or_default();
    engine_info!("Restored last query from {:?}", state_dir);
    Some(
        Query::new(persisted.text)
            .with_kind(kind)
            .with_year(persisted.year)
            .with_genre(persisted.genre),
    )
}

pub(crate) fn save_query(state_dir: &Path, query: &Query) {
    let persisted = PersistedQuery {
        text: query.text().to_string(),
        kind: query.kind().as_param().map(str::to_string),
        year: query.year().map(str::to_string),
        genre: query.genre().map(str::to_string),
    };

    let content = match ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize session: {}", err);
            return;
        }
    };

    if let Err(err) = session_file(state_dir).store(&content) {
        engine_error!("Failed to write session to {:?}: {}", state_dir, err);
    }
}
