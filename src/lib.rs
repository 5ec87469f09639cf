// Public library interface for slicemap
// The CLI and the debug-layout tool both build on these modules

pub mod input;
pub mod layout;
pub mod render;
pub mod tree;
