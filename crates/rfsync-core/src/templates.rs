// ── Profile templates ──
//
// A directory of YAML documents, one RF profile per file. Loading turns the
// directory into a name-keyed `TemplateSet`; exporting does the reverse from
// a live network, producing files the loader accepts as-is.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::model::ProfileDocument;

const TEMPLATE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Profile name -> template document, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSet {
    profiles: IndexMap<String, ProfileDocument>,
    duplicates: Vec<String>,
}

impl TemplateSet {
    /// Build from documents in order. A later document with an already
    /// seen name replaces the earlier one and is recorded as a duplicate.
    pub fn from_documents(docs: impl IntoIterator<Item = ProfileDocument>) -> Self {
        let mut set = Self::default();
        for doc in docs {
            let Some(name) = doc.name().map(str::to_owned) else {
                continue;
            };
            if set.profiles.insert(name.clone(), doc.into_template()).is_some() {
                set.duplicates.push(name);
            }
        }
        set
    }

    pub fn get(&self, name: &str) -> Option<&ProfileDocument> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Names defined by more than one document; the last one loaded won.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

fn is_template_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| TEMPLATE_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
}

fn template_files(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let entries = fs::read_dir(dir).map_err(|_| CoreError::NoTemplates {
        path: dir.display().to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CoreError::io(dir, &e))?.path();
        if is_template_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_template(path: &Path) -> Result<ProfileDocument, CoreError> {
    let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, &e))?;
    let doc: ProfileDocument =
        serde_yaml::from_str(&raw).map_err(|e| CoreError::InvalidTemplate {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    if doc.name().is_none_or(|n| n.trim().is_empty()) {
        return Err(CoreError::InvalidTemplate {
            path: path.display().to_string(),
            reason: "missing string field `name`".into(),
        });
    }
    Ok(doc)
}

/// Load every `.yaml`/`.yml` file in `dir`, sorted by file name.
///
/// A missing or template-less directory is `CoreError::NoTemplates`, which
/// callers may answer by asking for another directory.
pub fn load_templates(dir: &Path) -> Result<TemplateSet, CoreError> {
    let files = template_files(dir)?;
    if files.is_empty() {
        return Err(CoreError::NoTemplates {
            path: dir.display().to_string(),
        });
    }

    let mut docs = Vec::with_capacity(files.len());
    for path in &files {
        let doc = read_template(path)?;
        debug!(path = %path.display(), name = ?doc.name(), "loaded template");
        docs.push(doc);
    }

    let set = TemplateSet::from_documents(docs);
    for name in set.duplicates() {
        warn!(profile = %name, "profile defined by more than one template; last file wins");
    }
    info!(dir = %dir.display(), templates = set.len(), "templates loaded");
    Ok(set)
}

/// File name an exported profile is written under.
pub fn template_file_name(profile_name: &str) -> String {
    format!("{}.yaml", profile_name.to_lowercase().replace(' ', "_"))
}

/// Write one template document into `dir`, returning the file path.
pub fn write_template(dir: &Path, doc: &ProfileDocument) -> Result<PathBuf, CoreError> {
    let name = doc.name().ok_or_else(|| CoreError::InvalidTemplate {
        path: dir.display().to_string(),
        reason: "profile has no name".into(),
    })?;
    let path = dir.join(template_file_name(name));
    let yaml = serde_yaml::to_string(doc).map_err(|e| CoreError::Internal(e.to_string()))?;
    fs::write(&path, yaml).map_err(|e| CoreError::io(&path, &e))?;
    Ok(path)
}

/// Export every RF profile of a network as a template file in `dir`.
///
/// Remote-assigned fields are stripped so the files load straight back as
/// templates. `dir` must already exist.
pub async fn export_profiles<D: Dashboard>(
    dashboard: &D,
    network_id: &str,
    dir: &Path,
) -> Result<Vec<PathBuf>, CoreError> {
    if !dir.is_dir() {
        return Err(CoreError::Io {
            path: dir.display().to_string(),
            message: "directory does not exist".into(),
        });
    }

    let profiles = dashboard.list_rf_profiles(network_id).await?;
    let mut written = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let doc = ProfileDocument::from(profile).into_template();
        if doc.name().is_none() {
            warn!(network_id, "skipping RF profile without a name");
            continue;
        }
        let path = write_template(dir, &doc)?;
        debug!(path = %path.display(), "exported profile");
        written.push(path);
    }
    info!(network_id, exported = written.len(), "profiles exported");
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeDashboard;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn write(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn loads_yaml_files_and_ignores_others() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "legacy.yaml", "name: legacy\nbandSelectionType: ap\n");
        write(dir.path(), "boost.yml", "name: 5ghz-boost\nid: R9\nnetworkId: N9\n");
        write(dir.path(), "notes.txt", "name: ignored\n");

        let set = load_templates(dir.path()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), ["5ghz-boost", "legacy"]);
        let boost = set.get("5ghz-boost").unwrap();
        assert_eq!(boost.id(), None);
        assert!(set.duplicates().is_empty());
    }

    #[test]
    fn empty_or_missing_directory_is_retryable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_templates(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::NoTemplates { .. }));
        assert!(err.is_retryable());

        let err = load_templates(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn duplicate_names_last_file_wins_and_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yaml", "name: legacy\nminBitrate: 11\n");
        write(dir.path(), "b.yaml", "name: legacy\nminBitrate: 24\n");

        let set = load_templates(dir.path()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("legacy").unwrap().get("minBitrate"), Some(&json!(24)));
        assert_eq!(set.duplicates(), ["legacy"]);
    }

    #[test]
    fn document_without_name_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.yaml", "bandSelectionType: ap\n");
        assert!(matches!(
            load_templates(dir.path()),
            Err(CoreError::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn file_names_are_lowercased_with_underscores() {
        assert_eq!(template_file_name("Dense Hall 5G"), "dense_hall_5g.yaml");
    }

    #[tokio::test]
    async fn export_writes_loadable_templates() {
        let fake = FakeDashboard::new().with_raw_rf_profile(
            "N1",
            json!({
                "id": "R1",
                "networkId": "N1",
                "name": "Dense Hall",
                "bandSelectionType": "ap",
                "fiveGhzSettings": { "maxPower": 17, "channelWidth": "40" }
            }),
        );
        let dir = tempfile::tempdir().unwrap();

        let written = export_profiles(&fake, "N1", dir.path()).await.unwrap();

        assert_eq!(written, [dir.path().join("dense_hall.yaml")]);
        let set = load_templates(dir.path()).unwrap();
        let doc = set.get("Dense Hall").unwrap();
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            ["name", "bandSelectionType", "fiveGhzSettings"]
        );
    }

    #[tokio::test]
    async fn export_requires_existing_directory() {
        let fake = FakeDashboard::new();
        let dir = tempfile::tempdir().unwrap();
        let result = export_profiles(&fake, "N1", &dir.path().join("missing")).await;
        assert!(matches!(result, Err(CoreError::Io { .. })));
    }
}
