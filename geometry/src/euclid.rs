use crate::{
    affine::{Affine, IDENTITY_AFFINE},
    transform::Transform,
};

#[derive(Clone, Copy, Debug)]
pub enum Euclid {
    Translate((f64, f64)), // parameterizes (dx,dy) to move an object by
    Rotate(f64), // parameterizes counter-clockwise angle about the origin - expects radians
}

impl Transform for Euclid {
    fn as_affine(&self) -> Affine {
        match self {
            Euclid::Translate((dx, dy)) => Affine(IDENTITY_AFFINE.0, [*dx, *dy]),
            Euclid::Rotate(radians) => {
                let cos = radians.cos();
                let sin = radians.sin();
                Affine([[cos, -sin], [sin, cos]], IDENTITY_AFFINE.1)
            }
        }
    }
}
