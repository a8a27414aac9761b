//! Request-path dispatcher library.
//!
//! Maps a textual path and verb to a registered handler reference. Patterns may
//! embed named, optionally constrained macros such as `/users/{id}` or
//! `/files/{name:*.txt}`; among several matching routes the most literal one wins.
//!
//! ```
//! use route_dispatch::routing::{MacroFlavor, RouteTable, Verb};
//!
//! let mut table = RouteTable::new(MacroFlavor::Simple);
//! table.register("/{one}", Verb::Any, "one").unwrap();
//! table.register("/xxx-{two}", Verb::Any, "two").unwrap();
//!
//! let found = table.lookup("/xxx-foo", None).unwrap();
//! assert_eq!(*found.handler(), "two");
//! assert_eq!(found.bindings.get("two"), Some("foo"));
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::DispatchConfig;
pub use routing::{Router, RouteTable};
