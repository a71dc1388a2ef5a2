//! Salted hashing of reviewer identifiers

use crate::error::ResourceError;
use sha2::{Digest, Sha512};

/// Default separator between a reviewer id and its collection id
pub const DEFAULT_COLLECTION_PREFIX: &str = "__";

/// Replaces identifiers with salted SHA-512 digests
///
/// The same id, collection and salt always hash to the same digest, so
/// hashed ids can still be joined across datasets.
#[derive(Clone, PartialEq, Eq)]
pub struct Anonymiser {
    salt: String,
    collection_prefix: String,
}

impl Anonymiser {
    /// Create an anonymiser with the default collection prefix
    pub fn new(salt: impl Into<String>) -> Result<Self, ResourceError> {
        Self::with_collection_prefix(salt, DEFAULT_COLLECTION_PREFIX)
    }

    /// Create an anonymiser with a custom collection prefix
    pub fn with_collection_prefix(
        salt: impl Into<String>,
        collection_prefix: impl Into<String>,
    ) -> Result<Self, ResourceError> {
        let salt = salt.into();
        if salt.is_empty() {
            return Err(ResourceError::EmptySalt);
        }
        Ok(Self {
            salt,
            collection_prefix: collection_prefix.into(),
        })
    }

    /// Separator placed between id and collection id
    pub fn collection_prefix(&self) -> &str {
        &self.collection_prefix
    }

    /// Hash an identifier, optionally scoped to a collection
    ///
    /// The digest covers `id`, then the prefix and collection id when a
    /// collection is given, then the salt. Returns lowercase hex.
    pub fn hash_id(&self, id: &str, collection: Option<&str>) -> String {
        let mut hasher = Sha512::new();
        hasher.update(id.as_bytes());
        if let Some(collection) = collection {
            hasher.update(self.collection_prefix.as_bytes());
            hasher.update(collection.as_bytes());
        }
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }
}

// Debug output redacts the salt.
impl std::fmt::Debug for Anonymiser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymiser")
            .field("salt", &"<redacted>")
            .field("collection_prefix", &self.collection_prefix)
            .finish()
    }
}
