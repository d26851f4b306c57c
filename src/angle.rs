//! Angle units accepted by the rotation and skew constructors.

use bytemuck::{Pod, Zeroable};
use std::f64::consts::{FRAC_1_PI, PI};

/// Represents an angle.
pub trait Angle: Copy {
    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> f64;

    /// Returns the value of the angle in radians.
    fn radians(self) -> f64;
}

/// An angle in degrees, the unit CSS transform functions use by default.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f64);

/// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f64);

impl Angle for Degrees {
    fn as_degrees(self) -> Degrees {
        self
    }

    fn as_radians(self) -> Radians {
        Radians::from(self)
    }

    fn degrees(self) -> f64 {
        self.0
    }

    fn radians(self) -> f64 {
        degrees_to_radians(self.0)
    }
}

impl Angle for Radians {
    fn as_degrees(self) -> Degrees {
        Degrees::from(self)
    }

    fn as_radians(self) -> Radians {
        self
    }

    fn degrees(self) -> f64 {
        radians_to_degrees(self.0)
    }

    fn radians(self) -> f64 {
        self.0
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Self(radians_to_degrees(rad.0))
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Self(degrees_to_radians(deg.0))
    }
}

impl_abs_diff_eq!(Degrees, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.0, &b.0, epsilon)
});

impl_abs_diff_eq!(Radians, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.0, &b.0, epsilon)
});

impl_relative_eq!(Degrees, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.0, &b.0, epsilon, max_relative)
});

impl_relative_eq!(Radians, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.0, &b.0, epsilon, max_relative)
});

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 * FRAC_1_PI)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}
