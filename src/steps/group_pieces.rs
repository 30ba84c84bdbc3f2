use super::{aggregate, Piece};
use crate::analysis::{FragmentLabel, OutputGraphic};
use crate::geometry::{GeometryOps, LinearUnit};

use geo::{Area, MultiPolygon};
use std::collections::HashMap;
use std::fmt;

/// Canonical key of the (layer, value, buffer) combinations covering a piece.
///
/// Compared field by field, the `Display` form is only for output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<Token>);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Token {
    layer_id: String,
    value: String,
    // distance as f64 bits
    buffer: Option<(u64, LinearUnit)>,
}

impl Signature {
    /// None if no member names a layer
    pub fn of(members: &[FragmentLabel]) -> Option<Signature> {
        let mut tokens: Vec<Token> = members
            .iter()
            .filter(|m| !m.layer_id.is_empty())
            .map(Token::of)
            .collect();

        if tokens.is_empty() {
            return None;
        }
        tokens.sort();
        tokens.dedup();
        Some(Signature(tokens))
    }
}

impl Token {
    fn of(member: &FragmentLabel) -> Token {
        Token {
            layer_id: member.layer_id.clone(),
            value: member.value_key(),
            buffer: member.buffer().map(|b| (b.distance.to_bits(), b.unit)),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}:{}:", token.layer_id, token.value)?;
            if let Some((distance, unit)) = token.buffer {
                write!(f, "{}:{}", f64::from_bits(distance), unit.as_str())?;
            } else {
                f.write_str(":")?;
            }
        }
        Ok(())
    }
}

/// All pieces sharing one signature
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub signature: Signature,
    pub geometries: Vec<MultiPolygon>,
    /// distinct fragments over all pieces of the group
    pub members: Vec<FragmentLabel>,
}

impl Group {
    fn new(signature: Signature) -> Group {
        Group {
            signature,
            geometries: vec![],
            members: vec![],
        }
    }

    fn add(&mut self, piece: Piece) {
        self.geometries.push(piece.geometry);
        for member in piece.members {
            if !self.members.contains(&member) {
                self.members.push(member);
            }
        }
    }
}

/// Groups pieces by signature, in order of first appearance.
/// Pieces without a signature are dropped.
pub fn group_pieces(pieces: Vec<Piece>) -> Vec<Group> {
    let mut groups: Vec<Group> = vec![];
    let mut index: HashMap<Signature, usize> = HashMap::new();

    for piece in pieces {
        let Some(signature) = Signature::of(&piece.members) else {
            log::debug!("Dropping a piece covered by no layer");
            continue;
        };

        let i = *index.entry(signature.clone()).or_insert_with(|| {
            groups.push(Group::new(signature));
            groups.len() - 1
        });
        groups[i].add(piece);
    }
    groups
}

/// Unions the pieces of every group into one output graphic.
/// Groups whose union fails or is not polygonal are dropped.
pub fn union_groups<O: GeometryOps>(ops: &O, groups: Vec<Group>) -> Vec<OutputGraphic> {
    let mut graphics = Vec::with_capacity(groups.len());

    for group in groups {
        let geometry = match ops.union(&group.geometries) {
            Ok(Some(geometry)) => geometry,
            Ok(None) => {
                log::warn!("Union of group {} is not a polygon, dropped", group.signature);
                continue;
            }
            Err(e) => {
                log::warn!("Union of group {} failed, dropped: {e}", group.signature);
                continue;
            }
        };

        let mut attributes = aggregate(&group);
        attributes.area = geometry.unsigned_area();
        graphics.push(OutputGraphic {
            geometry,
            attributes,
        });
    }
    graphics
}
