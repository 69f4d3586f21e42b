mod descriptor;
mod registry;
mod resolver;

pub use descriptor::{DescriptorError, EntityTypeDescriptor, FieldKind};
pub use registry::{RegistryError, SchemaRegistry};
pub use resolver::{EntityResolver, ResolveError};
