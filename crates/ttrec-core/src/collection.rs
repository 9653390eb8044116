// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::object::PhysicsObject;
use std::ops::Index;
use std::slice::Iter;

/// Ordered, index-addressable container of reconstructed objects.
///
/// Insertion order is significant: the candidate enumeration downstream
/// refers to objects by position, not identity. Filtering always returns a
/// new collection; an input collection is never mutated or aliased by a
/// resolution step.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectCollection {
    objects: Vec<PhysicsObject>,
}

impl ObjectCollection {
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn from_vec(objects: Vec<PhysicsObject>) -> Self {
        Self { objects }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhysicsObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> Iter<'_, PhysicsObject> {
        self.objects.iter()
    }

    pub fn push(&mut self, object: PhysicsObject) {
        self.objects.push(object);
    }

    /// Returns a new collection with the objects satisfying `keep`,
    /// preserving order. The receiver is left untouched.
    pub fn filtered<F>(&self, mut keep: F) -> ObjectCollection
    where
        F: FnMut(&PhysicsObject) -> bool,
    {
        self.objects
            .iter()
            .filter(|object| keep(object))
            .copied()
            .collect()
    }

    pub fn count<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&PhysicsObject) -> bool,
    {
        self.objects
            .iter()
            .filter(|object| predicate(object))
            .count()
    }

    /// Concatenation preserving the order of both operands.
    pub fn concat(&self, other: &ObjectCollection) -> ObjectCollection {
        let mut objects = Vec::with_capacity(self.len() + other.len());
        objects.extend_from_slice(&self.objects);
        objects.extend_from_slice(&other.objects);
        ObjectCollection { objects }
    }

    /// Scalar sum of transverse momenta.
    pub fn sum_pt(&self) -> f64 {
        self.objects.iter().map(PhysicsObject::pt).sum()
    }
}

impl Index<usize> for ObjectCollection {
    type Output = PhysicsObject;

    fn index(&self, index: usize) -> &PhysicsObject {
        &self.objects[index]
    }
}

impl FromIterator<PhysicsObject> for ObjectCollection {
    fn from_iter<I: IntoIterator<Item = PhysicsObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObjectCollection {
    type Item = &'a PhysicsObject;
    type IntoIter = Iter<'a, PhysicsObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
