// Maskrs Engine Module
// Pure masking and caret recalculation, no state kept between calls

pub mod caret;
pub mod mask;

pub use caret::{recompute_caret, recompute_from_state, CaretState};
pub use mask::{clean_value, mask, masked_value, InvalidEntry, MaskResult};
