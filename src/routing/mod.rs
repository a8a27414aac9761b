//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (configuration phase, single writer):
//!     (pattern, verb, handler)
//!     → template.rs (segments → literal runs + macro tokens)
//!     → macros.rs (constraint compiled per table flavor)
//!     → table.rs (conflict check, append)
//!
//! Incoming lookup (path, verb), any number of concurrent readers:
//!     → table.rs (segment-count + verb filter)
//!     → matcher.rs (per-segment match, macro captures)
//!     → specificity.rs (rank survivors)
//!     → Return: winning Route + bindings, or None
//!
//! Reconfiguration:
//!     DispatchConfig → new RouteTable → router.rs (atomic snapshot swap)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - Most literal route wins, leftmost segment first, then registration order
//! - Explicit `None` rather than silent default

pub mod error;
pub mod macros;
pub mod matcher;
pub mod router;
pub mod specificity;
pub mod table;
pub mod template;

pub use error::{PatternError, RegisterError, RenderError};
pub use macros::{Constraint, MacroFlavor, MacroSyntax};
pub use matcher::{match_segment, MacroBindings};
pub use router::{Resolved, Router};
pub use specificity::Specificity;
pub use table::{MissingVerbPolicy, Route, RouteMatch, RouteTable, Verb};
pub use template::{split_path, MacroToken, Part, PathTemplate, SegmentTemplate, TemplateShape};
