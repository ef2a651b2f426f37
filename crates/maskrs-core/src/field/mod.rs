// Maskrs Fields
// Headless field bindings, their registry and dynamic mask switching

mod binding;
mod registry;
mod switch;

pub use binding::{FieldEvent, FieldOptions, FieldUpdate, MaskedField};
pub use registry::{FieldId, FieldRegistry};
pub use switch::{CharCount, MaskSwitch};
