//! Method and field references.
//!
//! A reference names a member by its containing class descriptor, its name
//! and its type descriptors. References print and parse in the smali form:
//!
//! ```text
//! Lcom/example/Foo;->bar(ILjava/lang/String;)V
//! Lcom/example/Foo;->count:I
//! ```

mod descriptor;
mod field;
mod method;

pub use descriptor::DescriptorError;
pub use field::{FieldReference, ImmutableFieldReference};
pub use method::{ImmutableMethodReference, MethodReference, ParameterTypes};
