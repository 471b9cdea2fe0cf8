#![deny(missing_docs)]
//! One canonical instance per asset type.
//!
//! The [`SingletonRegistry`] resolves, for any [`Asset`](asset_host::Asset)
//! type, the single object the rest of the program should use. On first
//! access it asks the host for every live object of that type, keeps the
//! one whose id it recorded earlier (or adopts one, see [`OrphanPolicy`]),
//! destroys the others, and creates a fresh object if nothing survived.
//! Every access re-applies the configured [`HideFlags`](asset_host::HideFlags)
//! so the host's unused-asset sweep never takes the canonical object.
//!
//! Objects the host constructs on its own bypass the registry. Installing a
//! [`SingletonGuard`] for a type (see [`SingletonRegistry::install`]) makes
//! the host destroy such newcomers whenever a canonical object already
//! exists.
//!
//! Resolution runs under one registry-wide mutex, so concurrent first
//! accesses create exactly one object.

mod accessor;
mod config;
mod error;
mod guard;
mod registry;

pub use accessor::SingletonAccessor;
pub use config::{OrphanPolicy, SingletonConfig};
pub use error::SingletonError;
pub use guard::SingletonGuard;
pub use registry::SingletonRegistry;
