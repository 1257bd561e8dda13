//! CropMatch decides whether one image is a scaled crop of another.
//!
//! The two inputs are ordered by dimension containment, the larger one is
//! halved into a search canvas, and the smaller one is swept over template
//! scales from 25% to 125% with ZNCC scoring. The best placement is accepted
//! when its score reaches 0.8 and is returned as an annotated canvas.
//! Scales can be scored in parallel with the `rayon` feature.

pub mod annotate;
mod candidate;
pub mod image;
pub mod io;
pub mod kernel;
pub mod orient;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use annotate::{draw_box, BoxStyle};
pub use candidate::topk::{Peak, TopK};
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{Kernel, ScanParams};
pub use orient::{select_orientation, OrientedPair};
pub use search::{
    find_crop, BestMatch, CropMatch, MatchConfig, MatchReport, Matcher, ScaleMatch, ScaleRange,
};
pub use template::{FlatTemplate, ScaledTemplate, TemplatePlan};
pub use util::{CropMatchError, CropMatchResult};
