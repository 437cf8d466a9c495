// Copyright 2026 the rowplan authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # rowplan
//!
//! Schema-driven layout and decode-plan derivation for binary table-based
//! metadata containers of the ECMA-335 / WinMD family.
//!
//! These formats store records in tables whose column widths depend on the
//! size of the data being decoded: an index into a heap or another table is
//! 2 bytes while the indexed pool is small and 4 bytes once it grows past
//! the 16-bit range. A reader therefore cannot bake record layouts in at
//! compile time — it has to resolve them per container instance.
//!
//! `rowplan` splits that problem in two:
//!
//! 1. **Generation** — [`generate`] consumes a declarative [`Schema`] (plus
//!    the [`SchemeSet`] of coded-index schemes the schema references) and
//!    derives one [`Artifacts`] value: the table [`Catalog`], per-table
//!    width formulas and decode plans, the coded-index dispatch tables, and
//!    the registry initialization order. Any schema-authoring error
//!    (duplicate codes, unresolved references, unsupported field widths)
//!    aborts generation; no partial artifact set is ever produced.
//! 2. **Decoding** — at runtime, a [`LayoutContext`] captures the resolved
//!    index widths of one concrete container, and [`DecodePlan::decode`]
//!    walks a byte cursor through one record, yielding a [`Record`] or a
//!    cursor fault. Records are independent; separate cursors may decode
//!    concurrently.
//!
//! The derived artifacts are plain values with no decision logic left in
//! them, so rendering them to generated source code is a pure formatting
//! step a consumer can layer on top — `rowplan` itself performs no I/O and
//! emits no text.
//!
//! ## Quick start
//!
//! ```rust
//! use rowplan::prelude::*;
//!
//! let schema = Schema::new(vec![TableDefinition::new("Module", 0x00)
//!     .with_field("generation", FieldKind::FixedInt { size: 2, flag_type: None })
//!     .with_field("name", FieldKind::HeapIndex { heap: Heap::String })]);
//! let schemes = SchemeSet::new(Vec::new());
//!
//! let artifacts = rowplan::generate(&schema, &schemes)?;
//! assert_eq!(artifacts.catalog.table_count(), 1);
//!
//! let ctx = LayoutContext::new(&[("Module", 1)], false, false, false, &schemes);
//! assert_eq!(artifacts.widths.get("Module").unwrap().eval(&ctx), 4);
//! # Ok::<(), rowplan::Error>(())
//! ```

mod error;
mod io;

pub mod builder;
pub mod context;
pub mod decode;
pub mod prelude;
pub mod schema;

pub use builder::{
    generate, Artifacts, Catalog, CatalogEntry, CodedDispatch, DecodePlan, DecodeStep,
    DispatchSet, PlanSet, ReadOp, Registry, RegistryEntry, WidthFormula, WidthSet, WidthTerm,
};
pub use context::LayoutContext;
pub use decode::{FieldValue, Record};
pub use error::Error;
pub use schema::{CodeScheme, FieldDefinition, FieldKind, Heap, Schema, SchemeSet, TableDefinition};

/// Convenience alias for operations that can fail with a [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
