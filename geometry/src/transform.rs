use crate::affine::Affine;

pub trait Transform {
    fn as_affine(&self) -> Affine;
}

pub trait Transformable<'a> {
    fn transform<T: Transform>(&self, transform: &'a T) -> Self;
}
