use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::i18n::{default_resume_title, Locale};
use crate::models::{ResumeData, ResumePatch, SavedResume};
use crate::storage::{StorageBackend, StorageError};

/// Key holding the JSON array of every saved resume.
pub const STORAGE_KEY: &str = "savedResumes";

/// CRUD over saved resumes. Each call reads the full list, modifies it and
/// writes it back while holding `write_lock`, so calls on one repository
/// never interleave.
pub struct ResumeRepository {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
    locale: Locale,
}

impl ResumeRepository {
    /// `locale` picks the language of generated default titles.
    pub fn new(backend: Arc<dyn StorageBackend>, locale: Locale) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            locale,
        }
    }

    fn load(&self) -> Result<Vec<SavedResume>, StorageError> {
        match self.backend.get(STORAGE_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    fn store(&self, records: &[SavedResume]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(STORAGE_KEY, &raw)
    }

    fn locked<T>(
        &self,
        f: impl FnOnce() -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        f()
    }

    /// Appends a new record. A missing or blank title becomes "CV - <date>".
    pub fn save(&self, data: ResumeData, title: Option<String>) -> Result<SavedResume, StorageError> {
        self.locked(|| {
            let now = Utc::now();
            let title = title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| default_resume_title(self.locale, now));
            let record = SavedResume {
                id: Uuid::new_v4(),
                title,
                date: now,
                resume_data: data,
            };
            let mut records = self.load()?;
            records.push(record.clone());
            self.store(&records)?;
            tracing::info!(id = %record.id, total = records.len(), "saved resume");
            Ok(record)
        })
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<SavedResume>, StorageError> {
        self.locked(|| self.load())
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Option<SavedResume>, StorageError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Merges `patch` into the record and refreshes its date. `Ok(None)` when
    /// `id` is unknown; `Conflict` when `if_unmodified_since` no longer matches.
    pub fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<SavedResume>, StorageError> {
        self.locked(|| {
            let mut records = self.load()?;
            let Some(record) = records.iter_mut().find(|r| r.id == id) else {
                return Ok(None);
            };
            if let Some(expected) = patch.if_unmodified_since {
                if record.date != expected {
                    tracing::warn!(%id, stored = %record.date, %expected, "stale resume update rejected");
                    return Err(StorageError::Conflict { id });
                }
            }
            if let Some(title) = patch.title {
                record.title = title;
            }
            if let Some(data) = patch.resume_data {
                record.resume_data = data;
            }
            record.date = Utc::now();
            let updated = record.clone();
            self.store(&records)?;
            tracing::info!(%id, "updated resume");
            Ok(Some(updated))
        })
    }

    /// Removes the record; `false` (and no write) when nothing matched.
    pub fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        self.locked(|| {
            let mut records = self.load()?;
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Ok(false);
            }
            self.store(&records)?;
            tracing::info!(%id, remaining = records.len(), "deleted resume");
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{self, ExperienceDraft};
    use crate::models::PersonalInfo;
    use crate::storage::{FileBackend, MemoryBackend};
    use tempfile::TempDir;

    fn repo() -> ResumeRepository {
        ResumeRepository::new(Arc::new(MemoryBackend::new()), Locale::Fr)
    }

    fn sample() -> ResumeData {
        let data = ResumeData::default().with_personal_info(PersonalInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        });
        editor::add_experience(
            &data,
            ExperienceDraft {
                company: "Acme".into(),
                position: "Engineer".into(),
                start_date: "Jan 2022".into(),
                current: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let repo = repo();
        let data = sample();
        let saved = repo.save(data.clone(), Some("My CV".into())).unwrap();
        let found = repo.get_by_id(saved.id).unwrap().unwrap();
        assert_eq!(found.resume_data, data);
        assert_eq!(found.title, "My CV");
    }

    #[test]
    fn test_default_title_is_localized() {
        let repo = repo();
        let saved = repo.save(ResumeData::default(), None).unwrap();
        assert!(saved.title.starts_with("CV - "), "{}", saved.title);
        let blank = repo.save(ResumeData::default(), Some("   ".into())).unwrap();
        assert!(blank.title.starts_with("CV - "));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let repo = repo();
        let a = repo.save(ResumeData::default(), Some("a".into())).unwrap();
        let b = repo.save(ResumeData::default(), Some("b".into())).unwrap();
        let ids: Vec<Uuid> = repo.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_delete_unknown_id_leaves_list_unchanged() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = ResumeRepository::new(backend.clone(), Locale::Fr);
        repo.save(sample(), Some("kept".into())).unwrap();
        let before = backend.get(STORAGE_KEY).unwrap();
        assert!(!repo.delete(Uuid::new_v4()).unwrap());
        assert_eq!(backend.get(STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_update_title_touches_only_title_and_date() {
        let repo = repo();
        let saved = repo.save(sample(), Some("Old".into())).unwrap();
        let updated = repo.update(saved.id, ResumePatch::title("New")).unwrap().unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.resume_data, saved.resume_data);
        assert_eq!(
            serde_json::to_string(&updated.resume_data).unwrap(),
            serde_json::to_string(&saved.resume_data).unwrap()
        );
        assert!(updated.date >= saved.date);
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let repo = repo();
        assert!(repo.update(Uuid::new_v4(), ResumePatch::title("x")).unwrap().is_none());
    }

    #[test]
    fn test_stale_update_is_rejected() {
        let repo = repo();
        let saved = repo.save(sample(), None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let first = repo
            .update(saved.id, ResumePatch::title("first").if_unmodified_since(saved.date))
            .unwrap()
            .unwrap();
        assert_ne!(first.date, saved.date);

        let stale = repo.update(saved.id, ResumePatch::title("second").if_unmodified_since(saved.date));
        assert!(matches!(stale, Err(StorageError::Conflict { .. })));
        assert_eq!(repo.get_by_id(saved.id).unwrap().unwrap().title, "first");

        let fresh = repo
            .update(saved.id, ResumePatch::title("third").if_unmodified_since(first.date))
            .unwrap()
            .unwrap();
        assert_eq!(fresh.title, "third");
    }

    #[test]
    fn test_save_list_delete_scenario() {
        let repo = repo();
        let saved = repo.save(sample(), None).unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
        assert!(repo.delete(saved.id).unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_persists_across_repositories() {
        let dir = TempDir::new().unwrap();
        let saved = {
            let backend = Arc::new(FileBackend::open(dir.path()).unwrap());
            ResumeRepository::new(backend, Locale::En)
                .save(sample(), Some("On disk".into()))
                .unwrap()
        };
        let backend = Arc::new(FileBackend::open(dir.path()).unwrap());
        let repo = ResumeRepository::new(backend, Locale::En);
        let found = repo.get_by_id(saved.id).unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(STORAGE_KEY, "{not json").unwrap();
        let repo = ResumeRepository::new(backend, Locale::Fr);
        assert!(matches!(repo.list(), Err(StorageError::Serialization(_))));
    }
}
