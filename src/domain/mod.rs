//! Domain layer: the emotion vocabulary, conversation state, and the
//! template bank. No I/O happens here.

pub mod conversation;
pub mod emotion;
pub mod foundation;
pub mod templates;
