//! Append-only file-backed row store.
//!
//! Stands in for the spreadsheet backend: rows are only ever appended and
//! read back in full; there is no update or delete. The store owns the
//! atomicity of a single append (one lock, one atomic file replace).

use serde_json;
use std::fs;
use std::fs::File;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub struct RowFileDb<T>
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone,
{
    db: Arc<Mutex<BaseRowFileDb<T>>>,
}

impl<T> RowFileDb<T>
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone,
{
    pub fn new(file_path: String) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(RowFileDb::<T> {
            db: Arc::new(Mutex::new(BaseRowFileDb::<T>::new(file_path)?)),
        })
    }

    /// Appends one row and persists the whole log.
    pub fn append(&self, row: T) -> Result<(), Box<dyn std::error::Error>> {
        let mut mutex = self.db.lock().unwrap();
        debug!("Appending {} row", std::any::type_name::<T>());
        mutex.data.push(row);
        mutex.save()
    }

    /// Full scan. Every report recomputes from this; nothing is cached.
    pub fn rows(&self) -> Vec<T> {
        let mutex = self.db.lock().unwrap();
        mutex.data.clone()
    }

    pub fn is_empty(&self) -> bool {
        let mutex = self.db.lock().unwrap();
        mutex.data.is_empty()
    }
}

struct BaseRowFileDb<T: serde::Serialize + for<'de> serde::Deserialize<'de>> {
    file_path: String,
    data: Vec<T>,
}

impl<T: serde::Serialize + for<'de> serde::Deserialize<'de>> BaseRowFileDb<T> {
    fn new(file_path: String) -> Result<Self, Box<dyn std::error::Error>> {
        let mut content = String::new();

        if !fs::exists(&file_path)? {
            // split and get folder, create folder if necessary
            let folder_path = file_path.split("/").collect::<Vec<&str>>()
                [..(file_path.split("/").count() - 1)]
                .join("/");
            if !folder_path.is_empty() && !fs::exists(&folder_path)? {
                fs::create_dir_all(&folder_path)?;
                info!("Created folder: {}", folder_path);
            }

            File::create(&file_path)?;
            info!("Created file: {}", file_path);
        } else {
            let mut file = File::open(&file_path)?;
            file.read_to_string(&mut content)?;
        } // file closed

        let data: Vec<T> = if content.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)?
        };

        Ok(BaseRowFileDb::<T> { file_path, data })
    }

    fn save(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.data)?;

        let tmp_path = format!("{}.tmp", &self.file_path);
        let mut file = File::create(&tmp_path)?; // this truncates the exiting file if any
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.file_path)?; // this replaces the existing file

        debug!("Saved file: {}", self.file_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Transaction;

    fn row(ts: &str, amount: i64) -> Transaction {
        Transaction {
            timestamp: ts.to_string(),
            category: "makanan".to_string(),
            description: String::new(),
            amount,
            source: "test".to_string(),
        }
    }

    #[test]
    fn append_then_read_all_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json").to_str().unwrap().to_string();

        let db = RowFileDb::<Transaction>::new(path.clone()).unwrap();
        assert!(db.is_empty());
        db.append(row("2024-06-01 08:00:00", -50000)).unwrap();
        db.append(row("2024-06-02 10:00:00", 1_000_000)).unwrap();

        // reopen from disk
        let db = RowFileDb::<Transaction>::new(path).unwrap();
        let rows = db.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, -50000);
        assert_eq!(rows[1].amount, 1_000_000);
    }
}
