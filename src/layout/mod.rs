//! Positioning text on pages.
//!
//! The centrepiece is the text flow engine ([layout] and [Flow]): it turns
//! paragraphs into a sequence of [Instruction]s, wrapping words greedily by
//! measured width and inserting page breaks before text would run into the
//! band reserved for footers. It never draws anything itself;
//! [Canvas::flow](crate::Canvas::flow) executes the instructions.
//!
//! The remaining helpers measure single lines (estimating what a font cannot
//! measure) and compute x positions for right-aligned or centred text.

mod flow;
mod margins;
mod text;

pub use flow::*;
pub use margins::*;
pub use text::*;
