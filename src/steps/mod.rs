pub mod aggregate;
pub mod clip_layers;
pub mod group_pieces;
pub mod subdivide;
pub mod total_weight;

pub use self::aggregate::aggregate;
pub use self::clip_layers::{clip_layer, clip_layers, fetch_candidates, LayerCandidates};
pub use self::group_pieces::{group_pieces, union_groups, Group, Signature};
pub use self::subdivide::{process_fragment, subdivide, Piece};
pub use self::total_weight::{apply_total_weights, total_weight, VETO_WEIGHT};
