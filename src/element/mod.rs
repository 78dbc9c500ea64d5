mod accessors;
mod annotations;
mod builder;
mod decimal;
mod equality;
mod error;
mod int;
mod metas;
mod path;
mod sequence;
mod strukt;
mod timestamp;
mod types;
mod value;

/// Ordered annotation sequence type.
pub use annotations::Annotations;
/// Transient builders that freeze into immutable elements.
pub use builder::{SeqBuilder, StructBuilder};
/// Exact decimal payload type.
pub use decimal::Decimal;
/// Error and result aliases.
pub use error::{ElementError, Result};
/// Integer payload type.
pub use int::Int;
/// Metadata side-channel types.
pub use metas::{MetaValue, Metas};
/// Element path parsing and traversal types.
pub use path::{ElementPath, PathStep};
/// Ordered child collection of lists and s-expressions.
pub use sequence::Sequence;
/// Struct multimap types and field-value iterator.
pub use strukt::{FieldValues, Struct, StructField};
/// Timestamp payload types.
pub use timestamp::{Fraction, Precision, Timestamp};
/// Variant tag enum.
pub use types::ElementType;
/// The element node and its payload union.
pub use value::{Element, Value};
