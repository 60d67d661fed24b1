use std::fmt::{Debug, Formatter};

use geodesy::prelude::*;

use crate::error::TransformError;
use crate::geo::traits::transform::{Transform, TransformDirection};
use crate::point::Point;

/// Transform backed by a `geodesy` operator.
///
/// The operator definition describes the projection from geographic coordinates into the
/// source reference system (e.g. `"utm zone=32"`), so [`TransformDirection::Forward`] runs the
/// operator inverse and [`TransformDirection::Reverse`] runs it forward.
pub struct GeodesyTransform {
    definition: String,
    context: Minimal,
    op: OpHandle,
}

impl GeodesyTransform {
    /// Creates a new transform from a `geodesy` operator definition.
    pub fn new(definition: &str) -> Result<Self, TransformError> {
        let mut context = Minimal::new();
        let op = context
            .op(definition)
            .map_err(|err| TransformError::Operator(format!("{definition}: {err}")))?;

        Ok(Self {
            definition: definition.to_string(),
            context,
            op,
        })
    }

    /// Operator definition of the transform.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    fn project(&self, point: &Point) -> Result<Point, TransformError> {
        let mut data = [Coor2D::geo(point.y(), point.x())];
        self.context
            .apply(self.op, Fwd, &mut data)
            .map_err(|err| TransformError::Operator(err.to_string()))?;

        let [x, y] = data[0].0;
        if !x.is_finite() || !y.is_finite() {
            return Err(TransformError::OutOfDomain {
                x: point.x(),
                y: point.y(),
            });
        }

        Ok(point.with_xy(x, y))
    }

    fn unproject(&self, point: &Point) -> Result<Point, TransformError> {
        let mut data = [Coor2D([point.x(), point.y()])];
        self.context
            .apply(self.op, Inv, &mut data)
            .map_err(|err| TransformError::Operator(err.to_string()))?;

        let [lon, lat] = data[0].0;
        if !lon.is_finite() || !lat.is_finite() {
            return Err(TransformError::OutOfDomain {
                x: point.x(),
                y: point.y(),
            });
        }

        Ok(point.with_xy(lon.to_degrees(), lat.to_degrees()))
    }
}

impl Debug for GeodesyTransform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeodesyTransform")
            .field("definition", &self.definition)
            .finish()
    }
}

impl Transform for GeodesyTransform {
    fn transform(
        &self,
        point: &Point,
        direction: TransformDirection,
    ) -> Result<Point, TransformError> {
        match direction {
            TransformDirection::Forward => self.unproject(point),
            TransformDirection::Reverse => self.project(point),
        }
    }
}
