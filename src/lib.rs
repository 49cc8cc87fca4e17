//! # tabjson
//!
//! A lightweight JSON document library: an in-memory value tree, a
//! pretty-printing writer, and a strict recursive-descent parser.
//!
//! tabjson is meant for embedding JSON read/write in tools without pulling in
//! a general-purpose serialization framework for the document itself:
//!
//! - [`Value`] is a closed union over the seven JSON kinds, with numbers
//!   split into 64-bit `Integer` and double-precision `Float`
//! - [`Object`] keeps its entries in canonical byte-ascending key order no
//!   matter the insertion order
//! - The writer emits a fixed, diff-friendly layout: multi-line objects
//!   indented with tabs, arrays on a single line
//! - The parser accepts compact or pretty input, materializes a full tree per
//!   call, and fails atomically with a positioned error
//!
//! ## Command-Line Tool
//!
//! This crate includes the `tj` CLI tool for re-formatting JSON from the
//! terminal:
//!
//! ```sh
//! # Format JSON from stdin
//! echo '{"b":2,"a":1}' | tj
//!
//! # Format a file into another
//! tj input.json -o output.json
//! ```
//!
//! Run `tj --help` for all options.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabjson::{parse, to_string, Object, Value};
//!
//! let mut obj = Object::new();
//! obj.insert("name", "Alice");
//! obj.insert("score", 95);
//!
//! let text = to_string(&Value::Object(obj)).unwrap();
//! let back = parse(&text).unwrap();
//! assert_eq!(back.as_object().unwrap().at("score").unwrap().as_integer().unwrap(), 95);
//! ```
//!
//! ## Building Trees
//!
//! Values convert implicitly from native types on the way in; reading back
//! out is either strict (the exact stored kind) or converting (across the two
//! numeric kinds only):
//!
//! ```rust
//! use tabjson::{Array, Value};
//!
//! let mut arr = Array::new();
//! arr.push_back(1u8);
//! arr.push_back(2.5f64);
//!
//! assert_eq!(arr.at(0).unwrap().as_integer().unwrap(), 1);
//! assert!(arr.at(1).unwrap().as_integer().is_err()); // strict access
//! assert_eq!(arr.at(1).unwrap().to_integer().unwrap(), 3); // ties away from zero
//! ```
//!
//! ## Serializing Rust Types
//!
//! Any type implementing [`serde::Serialize`] can be converted into a tree:
//!
//! ```rust
//! use serde::Serialize;
//! use tabjson::convert::from_serialize;
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     scores: Vec<i32>,
//! }
//!
//! let player = Player { name: "Alice".into(), scores: vec![95, 87, 92] };
//! let tree = from_serialize(&player, 64).unwrap();
//! assert!(tree.as_object().unwrap().contains_key("scores"));
//! ```
//!
//! ## Configuration
//!
//! Float output precision and the recursion depth limits are explicit
//! per-call options, never process-wide state:
//!
//! ```rust
//! use tabjson::{to_string_with, Value, WriteOptions};
//!
//! let options = WriteOptions { float_precision: 6, ..Default::default() };
//! let text = to_string_with(&Value::Float(1.0 / 3.0), options).unwrap();
//! assert_eq!(text, "0.333333");
//! ```

pub mod convert;
mod error;
mod model;
mod options;
mod parser;
mod tokenizer;
mod writer;

pub use crate::error::{ErrorKind, JsonError};
pub use crate::model::{Array, InputPosition, Object, Record, Value, ValueKind};
pub use crate::options::{ParseOptions, WriteOptions};
pub use crate::parser::{parse, parse_with, Parser};
pub use crate::writer::{record_to_string, to_string, to_string_with, to_writer, Writer};
