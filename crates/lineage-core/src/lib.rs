//! lineage-core: a single-rooted family relationship graph.
//!
//! The crate is a pure library with no process boundary of its own. It
//! models people connected by parent, spouse and child relations, enforces
//! the structural rules that keep the graph consistent (one spouse,
//! opposite-gender pairing, shared children between spouses, bounded
//! parent count, root-person restrictions), derives a display hierarchy,
//! and persists the whole root-reachable graph as one opaque blob.
//!
//! A presentation layer drives it through six entry points only:
//! [`FamilyTree::add_root`], [`FamilyTree::add_relative`],
//! [`FamilyTree::edit_details`], [`hierarchy::build`],
//! [`codec::serialize`]/[`codec::deserialize`], and
//! [`validate::validate_relative`]. Everything runs synchronously on the
//! caller's thread; the tree is exclusively owned by one session.
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns [`TreeError`]; each
//!   variant carries a stable [`ErrorCode`].
//! - **Logging**: `tracing` macros (`info!`, `debug!`) at mutation and
//!   persistence boundaries.

pub mod codec;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod tree;
pub mod validate;

pub use codec::{TREE_FILE_EXTENSION, deserialize, load_from_path, save_to_path, serialize};
pub use error::{ErrorCode, TreeError};
pub use hierarchy::{DisplayNode, build};
pub use model::{
    DetailsInput, Gender, Person, PersonDetails, PersonId, PersonInput, Relation, Role,
    selectable_relations,
};
pub use tree::{FamilyTree, RelativeSummary};
