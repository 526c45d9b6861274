//! Boolean encoding of nodes and node sets.

use std::collections::HashMap;

use log::debug;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::family::{Family, Flags, NODE_BITS, NUM_NODES};
use crate::reference::Ref;

/// Fail with [`Error::NodeOutOfRange`] unless `node` fits in [`NODE_BITS`] bits.
pub fn check_node(node: u32) -> Result<()> {
    if (node as usize) < NUM_NODES {
        Ok(())
    } else {
        Err(Error::NodeOutOfRange {
            node,
            limit: NUM_NODES,
        })
    }
}

/// Value of bit `bit` (0 is the most significant) of `node`.
fn bit_value(node: u32, bit: u32) -> bool {
    (node >> (NODE_BITS - 1 - bit)) & 1 == 1
}

/// Assignment of every `family` variable to the bits of `node`.
pub fn point_assignment(node: u32, family: Family) -> HashMap<u32, bool> {
    (0..NODE_BITS)
        .map(|bit| (family.variable(bit), bit_value(node, bit)))
        .collect()
}

impl Bdd {
    /// Conjunction of one literal per bit of `node` over `family`.
    pub fn encode_point(&self, node: u32, family: Family) -> Result<Ref> {
        check_node(node)?;
        Ok(self.point_cube(node, family))
    }

    pub(crate) fn point_cube(&self, node: u32, family: Family) -> Ref {
        self.cube((0..NODE_BITS).map(|bit| {
            let v = family.variable(bit) as i32;
            if bit_value(node, bit) {
                v
            } else {
                -v
            }
        }))
    }

    /// Disjunction of the encodings of every flagged node.
    ///
    /// An empty set encodes as the constant-true function, not constant-false.
    pub fn encode_set(&self, flags: &Flags, family: Family) -> Ref {
        let members: Vec<u32> = (0..NUM_NODES as u32)
            .filter(|&i| flags[i as usize])
            .collect();
        debug!("encode_set(family = {}, members = {:?})", family, members);

        if members.is_empty() {
            return self.one;
        }
        self.apply_or_many(members.into_iter().map(|i| self.point_cube(i, family)))
    }

    /// Restrict `f` to the encoding of `node` over `family` and check for constant true.
    pub fn decode_point_membership(&self, f: Ref, node: u32, family: Family) -> Result<bool> {
        check_node(node)?;
        let res = self.restrict_multi(f, &point_assignment(node, family));
        Ok(self.is_one(res))
    }
}
