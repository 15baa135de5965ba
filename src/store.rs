use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed user document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("no such user: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

/// One document in the `users` collection.
/// The uid is the document id (file stem), not a body field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(skip)]
    pub uid: String,
    pub email: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "isApproved", default)]
    pub is_approved: bool,
}

impl UserRecord {
    /// Name shown in user rows; matches the avatar fallback chain.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Anonymous")
    }

    /// Avatar fallback: first letter of the email, uppercased.
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// File-backed document store. Each user lives in
/// `<root>/users/<uid>.json`; the collection is the directory.
#[derive(Debug, Clone)]
pub struct UserStore {
    root: PathBuf,
}

impl UserStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join("users"))?;
        Ok(Self { root })
    }

    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    fn doc_path(&self, uid: &str) -> PathBuf {
        // uids are opaque ids, but they become filenames here
        let safe = uid.replace('/', "_");
        self.users_dir().join(format!("{}.json", safe))
    }

    fn read_doc(&self, path: &Path) -> Result<UserRecord, StoreError> {
        let file = fs::File::open(path)?;
        let mut record: UserRecord = serde_json::from_reader(file)?;
        record.uid = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(record)
    }

    /// One-shot read of the whole collection. No pagination, no filtering;
    /// ordering is whatever the directory iteration yields.
    pub fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut users = Vec::new();
        for entry in fs::read_dir(self.users_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_doc(&path) {
                Ok(record) => users.push(record),
                Err(e) => {
                    // A single bad document shouldn't take down the listing
                    tracing::warn!("skipping unreadable user doc {:?}: {}", path, e);
                }
            }
        }
        Ok(users)
    }

    pub fn get_user(&self, uid: &str) -> Result<UserRecord, StoreError> {
        let path = self.doc_path(uid);
        if !path.exists() {
            return Err(StoreError::NotFound(uid.to_string()));
        }
        self.read_doc(&path)
    }

    /// Create or replace a whole document.
    pub fn put_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        let path = self.doc_path(&record.uid);
        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(file, record)?;
        Ok(())
    }

    /// Single-field update: flip `isApproved` on one document.
    /// Role-gating is the caller's job; the store itself checks nothing.
    pub fn set_approval(&self, uid: &str, approved: bool) -> Result<(), StoreError> {
        let mut record = self.get_user(uid)?;
        record.is_approved = approved;
        self.put_user(&record)
    }

    /// Local dev helper: populate the collection with a few demo accounts
    /// so the dashboard has something to show. Sign-up itself is external.
    pub fn seed_demo_users(&self) -> Result<usize, StoreError> {
        let demo = [
            ("u-aria", "aria@youpify.dev", Some("Aria"), Role::Admin, true),
            ("u-badru", "badru@youpify.dev", Some("Badru"), Role::Member, true),
            ("u-chen", "chen@youpify.dev", None, Role::Member, false),
            ("u-dita", "dita@youpify.dev", Some("Dita"), Role::Member, false),
        ];
        let mut written = 0;
        for (uid, email, name, role, approved) in demo {
            if self.doc_path(uid).exists() {
                continue;
            }
            self.put_user(&UserRecord {
                uid: uid.to_string(),
                email: email.to_string(),
                display_name: name.map(|n| n.to_string()),
                photo_url: None,
                role,
                is_approved: approved,
            })?;
            written += 1;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp_store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn sample_user(uid: &str, approved: bool) -> UserRecord {
        UserRecord {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: Some("Sample".to_string()),
            photo_url: None,
            role: Role::Member,
            is_approved: approved,
        }
    }

    #[test]
    fn test_put_then_list_roundtrip() {
        let (_dir, store) = open_temp_store();
        store.put_user(&sample_user("abc", true)).unwrap();
        store.put_user(&sample_user("def", false)).unwrap();

        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 2);
        // uid comes from the filename, not the body
        assert!(users.iter().any(|u| u.uid == "abc" && u.is_approved));
        assert!(users.iter().any(|u| u.uid == "def" && !u.is_approved));
    }

    #[test]
    fn test_set_approval_visible_in_listing() {
        let (_dir, store) = open_temp_store();
        store.put_user(&sample_user("abc", false)).unwrap();

        store.set_approval("abc", true).unwrap();
        let users = store.list_users().unwrap();
        assert!(users.iter().find(|u| u.uid == "abc").unwrap().is_approved);

        store.set_approval("abc", false).unwrap();
        let users = store.list_users().unwrap();
        assert!(!users.iter().find(|u| u.uid == "abc").unwrap().is_approved);
    }

    #[test]
    fn test_set_approval_missing_user() {
        let (_dir, store) = open_temp_store();
        assert!(matches!(
            store.set_approval("ghost", true),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_document_field_names_match_collection_schema() {
        let (_dir, store) = open_temp_store();
        let mut user = sample_user("abc", true);
        user.photo_url = Some("https://img.example/a.png".to_string());
        store.put_user(&user).unwrap();

        let raw = std::fs::read_to_string(store.doc_path("abc")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("displayName").is_some());
        assert!(value.get("photoURL").is_some());
        assert!(value.get("isApproved").is_some());
        // the id lives in the filename only
        assert!(value.get("uid").is_none());
    }

    #[test]
    fn test_unreadable_doc_is_skipped() {
        let (_dir, store) = open_temp_store();
        store.put_user(&sample_user("good", true)).unwrap();
        std::fs::write(store.users_dir().join("bad.json"), "{not json").unwrap();

        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].uid, "good");
    }

    #[test]
    fn test_label_and_initial_fallbacks() {
        let mut user = sample_user("abc", true);
        user.display_name = None;
        assert_eq!(user.label(), "Anonymous");
        assert_eq!(user.initial(), "A");
    }
}
