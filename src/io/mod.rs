pub mod ring_output;
pub mod svg_output;
