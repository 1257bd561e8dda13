//! Peak selection over a score surface.

pub mod topk;
