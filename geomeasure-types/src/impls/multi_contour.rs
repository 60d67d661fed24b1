use serde::{Deserialize, Serialize};

use crate::impls::contour::Contour;

/// A set of contours.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiContour<P>(Vec<Contour<P>>);

impl<P> MultiContour<P> {
    /// Returns reference to the contours.
    pub fn parts(&self) -> &[Contour<P>] {
        &self.0
    }

    /// Adds a contour to the set.
    pub fn push(&mut self, contour: Contour<P>) {
        self.0.push(contour);
    }

    /// Number of contours in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the set contains no contours.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P> crate::multi_contour::MultiContour for MultiContour<P> {
    type Contour = Contour<P>;

    fn contours(&self) -> impl Iterator<Item = &Self::Contour> {
        self.0.iter()
    }
}

impl<P> From<Vec<Contour<P>>> for MultiContour<P> {
    fn from(value: Vec<Contour<P>>) -> Self {
        Self(value)
    }
}

impl<P> From<MultiContour<P>> for Vec<Contour<P>> {
    fn from(value: MultiContour<P>) -> Self {
        value.0
    }
}
