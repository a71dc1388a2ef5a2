//! Impfic Resources
//!
//! Lexical resource lookup and identifier anonymisation used alongside
//! parsed documents.
//!
//! - [`Lexicon`]: a read-only term table loaded once from a JSON file
//! - [`Anonymiser`]: salted SHA-512 hashing of reviewer identifiers
//!
//! # Examples
//!
//! ```
//! use impfic_resources::{Anonymiser, Lexicon};
//!
//! let lexicon = Lexicon::from_json_str(
//!     r#"[{"id-form": "lopen", "id-cat": "verb", "sem-type": "action"}]"#,
//! ).unwrap();
//! assert!(lexicon.has_term("lopen"));
//!
//! let anonymiser = Anonymiser::new("secret").unwrap();
//! let hashed = anonymiser.hash_id("reader42", Some("goodreads"));
//! assert_eq!(hashed.len(), 128);
//! ```

#![warn(missing_docs)]

mod anonymise;
mod error;
mod lexicon;

pub use anonymise::{Anonymiser, DEFAULT_COLLECTION_PREFIX};
pub use error::ResourceError;
pub use lexicon::{LexicalEntry, Lexicon};
