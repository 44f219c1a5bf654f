//! Domain services over the document store.
//!
//! Services are cheap to construct; the API layer builds one per request
//! from the shared `DocumentStore` handle and `CoreConfig`.

pub mod appointments;
pub mod identity;
