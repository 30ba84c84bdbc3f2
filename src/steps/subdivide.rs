use crate::analysis::{Fragment, FragmentLabel};
use crate::geometry::GeometryOps;
use crate::Result;

use geo::MultiPolygon;

/// One region of the planar subdivision together with every fragment covering it
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub geometry: MultiPolygon,
    pub members: Vec<FragmentLabel>,
}

// how an existing piece is cut by what is left of a new fragment
struct Split {
    old_only: Option<MultiPolygon>,
    overlap: MultiPolygon,
}

/// Decomposes possibly overlapping fragments into disjoint pieces.
///
/// Each fragment is tested against all pieces produced so far, so the cost
/// is quadratic in the number of fragments.
pub fn subdivide<O: GeometryOps>(ops: &O, fragments: &[Fragment]) -> Vec<Piece> {
    let pieces = fragments
        .iter()
        .fold(Vec::new(), |pieces, fragment| process_fragment(ops, pieces, fragment));

    log::debug!(
        "Subdivided {} fragments into {} pieces",
        fragments.len(),
        pieces.len()
    );
    pieces
}

/// Adds one fragment to a set of disjoint pieces.
///
/// Overlapped pieces are split into the part outside the fragment (old members)
/// and the overlap (old members plus the fragment). Whatever part of the fragment
/// overlaps no piece becomes a new piece of its own.
/// If a geometry operation fails the fragment is left out and `pieces` is returned as is.
pub fn process_fragment<O: GeometryOps>(
    ops: &O,
    pieces: Vec<Piece>,
    fragment: &Fragment,
) -> Vec<Piece> {
    match plan_splits(ops, &pieces, fragment) {
        Ok((splits, remaining)) => apply_splits(pieces, splits, remaining, &fragment.label),
        Err(e) => {
            log::warn!(
                "Feature {} of layer {} is left out of the overlay: {e}",
                fragment.label.object_id,
                fragment.label.layer_id
            );
            pieces
        }
    }
}

fn plan_splits<O: GeometryOps>(
    ops: &O,
    pieces: &[Piece],
    fragment: &Fragment,
) -> Result<(Vec<Option<Split>>, Option<MultiPolygon>)> {
    let mut remaining = Some(fragment.geometry.clone());
    let mut splits = Vec::with_capacity(pieces.len());

    for piece in pieces {
        let Some(rest) = &remaining else {
            splits.push(None);
            continue;
        };

        match split_piece(ops, piece, rest)? {
            Some((split, new_only)) => {
                splits.push(Some(split));
                remaining = new_only;
            }
            None => splits.push(None),
        }
    }
    Ok((splits, remaining))
}

fn split_piece<O: GeometryOps>(
    ops: &O,
    piece: &Piece,
    remaining: &MultiPolygon,
) -> Result<Option<(Split, Option<MultiPolygon>)>> {
    let (Some(piece_extent), Some(remaining_extent)) =
        (ops.extent(&piece.geometry), ops.extent(remaining))
    else {
        return Ok(None);
    };
    if !piece_extent.overlaps(&remaining_extent) {
        return Ok(None);
    }

    let Some(overlap) = ops.intersect(&piece.geometry, remaining)? else {
        return Ok(None);
    };
    let old_only = ops.difference(&piece.geometry, remaining)?;
    let new_only = ops.difference(remaining, &piece.geometry)?;

    Ok(Some((Split { old_only, overlap }, new_only)))
}

fn apply_splits(
    pieces: Vec<Piece>,
    splits: Vec<Option<Split>>,
    remaining: Option<MultiPolygon>,
    label: &FragmentLabel,
) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len() + 2);

    for (piece, split) in pieces.into_iter().zip(splits) {
        let Some(Split { old_only, overlap }) = split else {
            out.push(piece);
            continue;
        };

        let mut members = piece.members.clone();
        members.push(label.clone());

        if let Some(old_only) = old_only {
            out.push(Piece {
                geometry: old_only,
                members: piece.members,
            });
        }
        out.push(Piece {
            geometry: overlap,
            members,
        });
    }

    if let Some(rest) = remaining {
        out.push(Piece {
            geometry: rest,
            members: vec![label.clone()],
        });
    }
    out
}
