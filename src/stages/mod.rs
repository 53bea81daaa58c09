pub mod stage0_segment;
pub mod stage1_annotate;
pub mod stage2_reconcile;
pub mod stage3_render;
pub mod stage4_merge;

pub use stage0_segment::*;
pub use stage1_annotate::*;
pub use stage2_reconcile::*;
pub use stage3_render::*;
pub use stage4_merge::*;
