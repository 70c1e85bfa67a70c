use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use rsvp_core::{Host, RsvpDraft, RsvpResponse};

use crate::api::{DbState, NewHost, CURRENT_SCHEMA, RSVP_REDB_FILENAME};
use crate::codec::{decode_host, decode_rsvp, encode_host, encode_rsvp};
use crate::keys::RsvpKey;
use crate::maintenance::quarantine_corrupt_file;
use crate::{RsvpDataStore, StorageError};

const META: TableDefinition<&str, &str> = TableDefinition::new("meta");
const HOSTS: TableDefinition<&str, &[u8]> = TableDefinition::new("hosts");
const HOST_SLUGS: TableDefinition<&str, &str> = TableDefinition::new("host_slugs");
const RSVPS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("rsvps");
const RSVP_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("rsvp_index");

const META_FORMAT_KEY: &str = "format";
const META_FORMAT_VALUE: &str = "rsvp-redb";
const META_SCHEMA_VERSION: &str = "schema_version";
const META_CREATED_AT: &str = "created_at";
const META_LAST_WRITE_AT: &str = "last_write_at";

#[derive(Debug, Clone)]
pub struct RedbRsvpStore {
    root: Utf8PathBuf,
}

impl RedbRsvpStore {
    fn is_corrupt_open_error(err: &redb::DatabaseError) -> bool {
        match err {
            redb::DatabaseError::Storage(storage) => match storage {
                redb::StorageError::Corrupted(_) => true,
                redb::StorageError::Io(ioe) => matches!(
                    ioe.kind(),
                    std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof
                ),
                _ => false,
            },
            _ => false,
        }
    }

    fn db_cache() -> &'static Mutex<HashMap<Utf8PathBuf, Arc<Database>>> {
        static CACHE: OnceLock<Mutex<HashMap<Utf8PathBuf, Arc<Database>>>> = OnceLock::new();
        CACHE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path_for_root(root: &Utf8Path) -> Utf8PathBuf {
        root.join(RSVP_REDB_FILENAME)
    }

    fn db_path(&self) -> Utf8PathBuf {
        Self::path_for_root(&self.root)
    }

    fn cached(path: &Utf8Path) -> Option<Arc<Database>> {
        let mut cache = Self::db_cache()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let existing = cache.get(path).cloned()?;
        if path.exists() {
            Some(existing)
        } else {
            cache.remove(path);
            None
        }
    }

    fn remember(path: Utf8PathBuf, db: Database) -> Arc<Database> {
        let db = Arc::new(db);
        Self::db_cache()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, db.clone());
        db
    }

    fn open_or_create(&self) -> Result<Arc<Database>, StorageError> {
        let path = self.db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(existing) = Self::cached(&path) {
            return Ok(existing);
        }

        let db = if path.exists() {
            self.open_checked(&path)?
        } else {
            Database::create(path.as_std_path())?
        };
        self.finish_open(path, db)
    }

    fn open_existing(&self) -> Result<Arc<Database>, StorageError> {
        let path = self.db_path();
        if !path.exists() {
            return Err(StorageError::Missing);
        }
        if let Some(existing) = Self::cached(&path) {
            return Ok(existing);
        }
        let db = self.open_checked(&path)?;
        self.finish_open(path, db)
    }

    fn open_checked(&self, path: &Utf8Path) -> Result<Database, StorageError> {
        match Database::open(path.as_std_path()) {
            Ok(db) => Ok(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => Err(StorageError::Busy),
            Err(e) if Self::is_corrupt_open_error(&e) => {
                let _ = quarantine_corrupt_file(path);
                Err(StorageError::Corrupt)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn finish_open(&self, path: Utf8PathBuf, db: Database) -> Result<Arc<Database>, StorageError> {
        if let Err(e) = self.ensure_schema(&db) {
            drop(db);
            if matches!(e, StorageError::Corrupt) {
                let _ = quarantine_corrupt_file(&path);
            }
            return Err(e);
        }
        Ok(Self::remember(path, db))
    }

    fn ensure_schema(&self, db: &Database) -> Result<(), StorageError> {
        // Create tables and required meta keys on first open.
        let write_tx = db.begin_write()?;
        {
            let mut meta = write_tx.open_table(META)?;
            let format: Option<String> = meta.get(META_FORMAT_KEY)?.map(|g| g.value().to_string());
            if format.is_none() {
                let schema_version = CURRENT_SCHEMA.to_string();
                let created_at = Utc::now().to_rfc3339();
                meta.insert(META_FORMAT_KEY, META_FORMAT_VALUE)?;
                meta.insert(META_SCHEMA_VERSION, schema_version.as_str())?;
                meta.insert(META_CREATED_AT, created_at.as_str())?;
            } else if format.as_deref() != Some(META_FORMAT_VALUE) {
                return Err(StorageError::Corrupt);
            }
        }
        let _ = write_tx.open_table(HOSTS)?;
        let _ = write_tx.open_table(HOST_SLUGS)?;
        let _ = write_tx.open_table(RSVPS)?;
        let _ = write_tx.open_table(RSVP_INDEX)?;
        write_tx.commit()?;

        let read_tx = db.begin_read()?;
        let meta = read_tx.open_table(META)?;
        let schema_version = meta
            .get(META_SCHEMA_VERSION)?
            .and_then(|g| g.value().parse::<u32>().ok())
            .unwrap_or(0);
        if schema_version == 0 {
            return Err(StorageError::Corrupt);
        }
        if schema_version > CURRENT_SCHEMA {
            return Err(StorageError::NewerSchema {
                found: schema_version,
                supported: CURRENT_SCHEMA,
            });
        }
        if schema_version != CURRENT_SCHEMA {
            return Err(StorageError::Corrupt);
        }
        Ok(())
    }

    /// Open for reading; a missing file reads as an empty store.
    fn open_for_read(&self) -> Result<Option<Arc<Database>>, StorageError> {
        match self.open_existing() {
            Ok(db) => Ok(Some(db)),
            Err(StorageError::Missing) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn update_host(
        &self,
        slug: &str,
        edit: impl FnOnce(&mut Host),
    ) -> Result<Host, StorageError> {
        let db = self.open_or_create()?;
        let write_tx = db.begin_write()?;
        let host = {
            let slugs = write_tx.open_table(HOST_SLUGS)?;
            let host_id = slugs
                .get(slug)?
                .map(|g| g.value().to_string())
                .ok_or_else(|| StorageError::HostNotFound(slug.to_string()))?;

            let mut hosts = write_tx.open_table(HOSTS)?;
            let stored = hosts
                .get(host_id.as_str())?
                .map(|g| g.value().to_vec())
                .ok_or(StorageError::Corrupt)?;
            let mut host = decode_host(&stored)?;
            edit(&mut host);
            let bytes = encode_host(&host)?;
            hosts.insert(host_id.as_str(), bytes.as_slice())?;
            touch(&write_tx)?;
            host
        };
        write_tx.commit()?;
        Ok(host)
    }
}

fn touch(write_tx: &redb::WriteTransaction) -> Result<(), StorageError> {
    let ts = Utc::now().to_rfc3339();
    let mut meta = write_tx.open_table(META)?;
    meta.insert(META_LAST_WRITE_AT, ts.as_str())?;
    Ok(())
}

impl RsvpDataStore for RedbRsvpStore {
    fn validate(&self) -> Result<DbState, StorageError> {
        let path = self.db_path();
        if !path.exists() {
            return Ok(DbState::Missing);
        }
        if Self::cached(&path).is_some() {
            return Ok(DbState::Valid);
        }

        match Database::open(path.as_std_path()) {
            Ok(db) => match self.ensure_schema(&db) {
                Ok(()) => Ok(DbState::Valid),
                Err(StorageError::NewerSchema { found, supported }) => {
                    Ok(DbState::NewerSchema { found, supported })
                }
                Err(StorageError::Busy) => Ok(DbState::Busy),
                Err(StorageError::Corrupt) => {
                    drop(db);
                    let _ = quarantine_corrupt_file(&path);
                    Ok(DbState::Corrupt)
                }
                Err(e) => Err(e),
            },
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => Ok(DbState::Busy),
            Err(e) if Self::is_corrupt_open_error(&e) => {
                let _ = quarantine_corrupt_file(&path);
                Ok(DbState::Corrupt)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_host_by_slug(&self, slug: &str) -> Result<Option<Host>, StorageError> {
        let Some(db) = self.open_for_read()? else {
            return Ok(None);
        };
        let read_tx = db.begin_read()?;
        let slugs = read_tx.open_table(HOST_SLUGS)?;
        let Some(host_id) = slugs.get(slug)?.map(|g| g.value().to_string()) else {
            return Ok(None);
        };
        let hosts = read_tx.open_table(HOSTS)?;
        let guard = hosts.get(host_id.as_str())?.ok_or(StorageError::Corrupt)?;
        decode_host(guard.value()).map(Some)
    }

    fn insert_host(&self, new: &NewHost) -> Result<Host, StorageError> {
        RsvpKey::validate_id(&new.slug)?;
        let db = self.open_or_create()?;
        let host = Host {
            id: uuid::Uuid::new_v4().to_string(),
            slug: new.slug.clone(),
            couple_name: new.couple_name.clone(),
            theme_id: new.theme_id.clone(),
            cover_image_url: None,
            event_date: new.event_date.clone(),
            location: new.location.clone(),
            created_at: Utc::now(),
        };

        let write_tx = db.begin_write()?;
        {
            let mut slugs = write_tx.open_table(HOST_SLUGS)?;
            if slugs.get(host.slug.as_str())?.is_some() {
                return Err(StorageError::SlugTaken(host.slug));
            }
            slugs.insert(host.slug.as_str(), host.id.as_str())?;

            let bytes = encode_host(&host)?;
            let mut hosts = write_tx.open_table(HOSTS)?;
            hosts.insert(host.id.as_str(), bytes.as_slice())?;
            touch(&write_tx)?;
        }
        write_tx.commit()?;
        tracing::debug!(slug = %host.slug, host_id = %host.id, "host created");
        Ok(host)
    }

    fn set_host_theme(&self, slug: &str, theme_id: &str) -> Result<Host, StorageError> {
        self.update_host(slug, |h| h.theme_id = Some(theme_id.to_string()))
    }

    fn set_cover_image(
        &self,
        slug: &str,
        cover_image_url: Option<&str>,
    ) -> Result<Host, StorageError> {
        self.update_host(slug, |h| h.cover_image_url = cover_image_url.map(str::to_string))
    }

    fn append_rsvp(
        &self,
        host_id: &str,
        draft: &RsvpDraft,
        created_at: DateTime<Utc>,
    ) -> Result<RsvpResponse, StorageError> {
        RsvpKey::validate_id(host_id)?;
        let db = self.open_or_create()?;
        let rsvp = RsvpResponse {
            id: uuid::Uuid::new_v4().to_string(),
            host_id: host_id.to_string(),
            guest_name: draft.guest_name.clone(),
            guest_email: draft.guest_email.clone(),
            guest_phone: draft.guest_phone.clone(),
            attending: draft.attending,
            party_size: draft.party_size,
            message: draft.message.clone(),
            created_at,
        };
        let key = RsvpKey::new(host_id, created_at, &rsvp.id).to_bytes();
        let value = encode_rsvp(&rsvp)?;

        let write_tx = db.begin_write()?;
        {
            let hosts = write_tx.open_table(HOSTS)?;
            if hosts.get(host_id)?.is_none() {
                return Err(StorageError::HostNotFound(host_id.to_string()));
            }
            let mut rsvps = write_tx.open_table(RSVPS)?;
            rsvps.insert(key.as_slice(), value.as_slice())?;
            let mut index = write_tx.open_table(RSVP_INDEX)?;
            index.insert(rsvp.id.as_str(), key.as_slice())?;
            touch(&write_tx)?;
        }
        write_tx.commit()?;
        Ok(rsvp)
    }

    fn list_rsvps(&self, host_id: &str) -> Result<Vec<RsvpResponse>, StorageError> {
        let (start, end) = RsvpKey::range_for_host(host_id)?;
        let Some(db) = self.open_for_read()? else {
            return Ok(Vec::new());
        };
        let read_tx = db.begin_read()?;
        let rsvps = read_tx.open_table(RSVPS)?;

        let mut out = Vec::new();
        for row in rsvps.range(start.as_slice()..end.as_slice())?.rev() {
            let (_, v) = row?;
            out.push(decode_rsvp(v.value())?);
        }
        Ok(out)
    }

    fn delete_rsvp(&self, rsvp_id: &str) -> Result<bool, StorageError> {
        let path = self.db_path();
        if !path.exists() {
            return Ok(false);
        }
        let db = self.open_or_create()?;
        let write_tx = db.begin_write()?;
        let removed = {
            let mut index = write_tx.open_table(RSVP_INDEX)?;
            let key = index.remove(rsvp_id)?.map(|g| g.value().to_vec());
            match key {
                Some(key) => {
                    let mut rsvps = write_tx.open_table(RSVPS)?;
                    let _ = rsvps.remove(key.as_slice())?;
                    touch(&write_tx)?;
                    true
                }
                None => false,
            }
        };
        write_tx.commit()?;
        Ok(removed)
    }
}
