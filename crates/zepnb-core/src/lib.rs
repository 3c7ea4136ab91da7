//! `zepnb-core`.
//!
//! Reshapes a Zeppelin note (a named list of paragraphs) into a Jupyter
//! notebook (a list of typed cells). The crate performs no I/O: callers hand
//! it the raw document bytes and receive the serialized notebook back.
//!
//! # Example
//!
//! ```
//! use zepnb_core::{WriteOptions, convert_str, to_json_string};
//!
//! let note = r#"{"name": "demo", "paragraphs": [{"text": "%sql select 1"}]}"#;
//! let conversion = convert_str(note).unwrap();
//! assert_eq!(conversion.name, "demo");
//!
//! let json = to_json_string(&conversion.notebook, &WriteOptions::default())
//!   .unwrap();
//! assert!(json.contains("%%sql select 1"));
//! ```

pub mod convert;
pub mod directive;
pub mod error;
pub mod note;
pub mod notebook;
pub mod table;
pub mod write;

pub use convert::{Conversion, convert, convert_slice, convert_str};
pub use directive::Directive;
pub use error::ConvertError;
pub use note::{Note, Paragraph, ParagraphResult, ResultType};
pub use notebook::{Cell, MultilineString, Notebook, Output};
pub use table::table_to_html;
pub use write::{WriteOptions, to_json_string};
