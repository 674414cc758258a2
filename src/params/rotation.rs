//! Rotatie rond een punt, gekoppeld aan een genummerde constraint.

use serde::Serialize;

use crate::geom::{Point2, Transform2};
use crate::parse::dmp::{DmpParameters, ParseResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RotationConstraint {
    center: Point2,
    angle: f64,
    constraint_index: usize,
    center_x_name: String,
    center_y_name: String,
    angle_name: String,
}

impl RotationConstraint {
    #[must_use]
    pub fn new(center: Point2, angle: f64, constraint_index: usize) -> Self {
        Self {
            center,
            angle,
            constraint_index,
            ..Self::default()
        }
    }

    /// Labels waaronder middelpunt en hoek in het DMP-bestand staan.
    #[must_use]
    pub fn with_labels(
        mut self,
        center_x: impl Into<String>,
        center_y: impl Into<String>,
        angle: impl Into<String>,
    ) -> Self {
        self.center_x_name = center_x.into();
        self.center_y_name = center_y.into();
        self.angle_name = angle.into();
        self
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn set_center(&mut self, center: Point2) {
        self.center = center;
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    #[must_use]
    pub fn constraint_index(&self) -> usize {
        self.constraint_index
    }

    pub fn set_constraint_index(&mut self, index: usize) {
        self.constraint_index = index;
    }

    #[must_use]
    pub fn center_x_name(&self) -> &str {
        &self.center_x_name
    }

    pub fn set_center_x_name(&mut self, name: impl Into<String>) {
        self.center_x_name = name.into();
    }

    #[must_use]
    pub fn center_y_name(&self) -> &str {
        &self.center_y_name
    }

    pub fn set_center_y_name(&mut self, name: impl Into<String>) {
        self.center_y_name = name.into();
    }

    #[must_use]
    pub fn angle_name(&self) -> &str {
        &self.angle_name
    }

    pub fn set_angle_name(&mut self, name: impl Into<String>) {
        self.angle_name = name.into();
    }

    /// Leest middelpunt en hoek uit DMP-parameters. Lege labels laten het
    /// bijbehorende veld ongemoeid.
    pub fn resolve(&mut self, parameters: &DmpParameters) -> ParseResult<()> {
        let lookup = |name: &str, current: f64| {
            if name.is_empty() {
                Ok(current)
            } else {
                parameters.require(name)
            }
        };
        let x = lookup(&self.center_x_name, self.center.x)?;
        let y = lookup(&self.center_y_name, self.center.y)?;
        let angle = lookup(&self.angle_name, self.angle)?;

        self.center = Point2::new(x, y);
        self.angle = angle;
        Ok(())
    }

    #[must_use]
    pub fn to_transform(&self) -> Transform2 {
        Transform2::rotate_about(self.center, self.angle)
    }

    #[must_use]
    pub fn rotate_point(&self, point: Point2) -> Point2 {
        self.to_transform().apply_point(point)
    }
}
