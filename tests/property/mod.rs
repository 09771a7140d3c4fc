//! Property-based tests for decoding and selection invariants

mod decoder_slicing;
mod selection_bounds;
