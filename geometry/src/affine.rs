use crate::transform::{Transform, Transformable};

pub const IDENTITY_AFFINE: Affine = Affine([[1., 0.], [0., 1.]], [0., 0.]);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine(pub [[f64; 2]; 2], pub [f64; 2]); // (row-major transform matrix, translation vector)

impl Affine {
    pub(crate) fn mul_0(lhs: &Affine, rhs: &Affine, i: usize, j: usize) -> f64 {
        lhs.0[j][0] * rhs.0[0][i] + lhs.0[j][1] * rhs.0[1][i]
    }

    pub(crate) fn mul_1(lhs: &Affine, rhs: &Affine, i: usize) -> f64 {
        lhs.0[i][0] * rhs.1[0] + lhs.0[i][1] * rhs.1[1] + lhs.1[i]
    }
}

impl Transform for Affine {
    fn as_affine(&self) -> Affine {
        *self
    }
}

impl<'a> Transformable<'a> for Affine {
    // composes transform after self
    fn transform<T: Transform>(&self, transform: &'a T) -> Self {
        let lhs = &transform.as_affine();
        let rhs = self;
        Affine(
            [
                [Affine::mul_0(lhs, rhs, 0, 0), Affine::mul_0(lhs, rhs, 1, 0)],
                [Affine::mul_0(lhs, rhs, 0, 1), Affine::mul_0(lhs, rhs, 1, 1)],
            ],
            [Affine::mul_1(lhs, rhs, 0), Affine::mul_1(lhs, rhs, 1)],
        )
    }
}
