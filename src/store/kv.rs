use crate::db::initialize::init_db;
use crate::db::kv::{kv_get, kv_set};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Submission;
use crate::store::{RecordStore, decode_blob, encode_blob};
use std::fs;
use std::path::Path;

/// Record store backed by one row of the SQLite `kv_store` table.
pub struct KvRecordStore {
    pool: DbPool,
    key: String,
}

impl KvRecordStore {
    /// Open (or create) the database at `path` and make sure the schema is current.
    pub fn open(path: &str, key: &str) -> AppResult<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let pool = DbPool::new(path)?;
        Self::from_pool(pool, key)
    }

    pub fn from_pool(pool: DbPool, key: &str) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            key: key.to_string(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl RecordStore for KvRecordStore {
    fn load(&self) -> Vec<Submission> {
        match kv_get(&self.pool.conn, &self.key) {
            Ok(raw) => decode_blob(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "cannot read stored submissions");
                Vec::new()
            }
        }
    }

    fn save(&self, submissions: &[Submission]) -> AppResult<()> {
        let encoded = encode_blob(submissions)?;
        kv_set(&self.pool.conn, &self.key, &encoded)
    }
}
