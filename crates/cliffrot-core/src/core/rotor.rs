use super::paravector::{OwnedParavector, Paravector, ParavectorRef};
use super::scratch::RotorRows;
use nalgebra::Vector3;
use std::borrow::{Borrow, BorrowMut};

/// A rotor `R` and its reverse `R†`, built once per call and shared read-only
/// by every worker.
#[derive(Debug, Clone, Copy)]
pub struct RotorPair<'a> {
    pub rotor: ParavectorRef<'a>,
    pub reverse: ParavectorRef<'a>,
}

/// Writes the rotor for a rotation of `angle` radians about `axis` into `rotor`.
///
/// `axis` must already be normalized and carry no imaginary vector part.
/// The rotor has `real = cos(angle / 2)`, `vimag = sin(angle / 2) * axis` and
/// zero `imag` and `vreal`.
pub fn build_rotor<V, A>(rotor: &mut Paravector<V>, axis: &Paravector<A>, angle: f64)
where
    V: BorrowMut<Vector3<f64>>,
    A: Borrow<Vector3<f64>>,
{
    let (sin, cos) = (angle / 2.0).sin_cos();
    rotor.real = cos;
    rotor.imag = 0.0;
    rotor.vreal_mut().fill(0.0);
    *rotor.vimag_mut() = axis.vreal() * sin;
}

/// The sandwich product `out = rotor_rev · operand · rotor`, using `tmp` for the
/// intermediate product.
///
/// Only `vreal(out)` is meaningful for a unit rotor and a real vector operand.
#[inline]
pub fn sandwich<O, T, R, A, S>(
    out: &mut Paravector<O>,
    tmp: &mut Paravector<T>,
    rotor_rev: &Paravector<R>,
    operand: &Paravector<A>,
    rotor: &Paravector<S>,
) where
    O: BorrowMut<Vector3<f64>>,
    T: BorrowMut<Vector3<f64>>,
    R: Borrow<Vector3<f64>>,
    A: Borrow<Vector3<f64>>,
    S: Borrow<Vector3<f64>>,
{
    tmp.cli_product(rotor_rev, operand);
    out.cli_product(tmp, rotor);
}

impl<'a> RotorPair<'a> {
    /// Normalizes `axis` and builds the rotor pair inside the given scratch rows.
    /// The caller's axis is not modified.
    pub fn build(rows: RotorRows<'a>, axis: &Vector3<f64>, angle: f64) -> Self {
        let RotorRows {
            rotor_real,
            rotor_rev_real,
            axis_imag,
            rotor_imag,
            rotor_rev_imag,
        } = rows;

        rotor_rev_real.copy_from(axis);
        axis_imag.fill(0.0);

        let mut rotor = Paravector::from_vectors(rotor_real, rotor_imag);
        {
            let mut unit_axis = Paravector::from_vectors(&mut *rotor_rev_real, &mut *axis_imag);
            unit_axis.normalize();
            build_rotor(&mut rotor, &unit_axis, angle);
        }

        let mut reverse = Paravector::from_vectors(rotor_rev_real, rotor_rev_imag);
        reverse.reverse_from(&rotor);

        Self {
            rotor: rotor.freeze(),
            reverse: reverse.freeze(),
        }
    }

    /// Rotates `operand` into `out`, using `tmp` as scratch.
    #[inline]
    pub fn apply<O, T, A>(
        &self,
        out: &mut Paravector<O>,
        tmp: &mut Paravector<T>,
        operand: &Paravector<A>,
    ) where
        O: BorrowMut<Vector3<f64>>,
        T: BorrowMut<Vector3<f64>>,
        A: Borrow<Vector3<f64>>,
    {
        sandwich(out, tmp, &self.reverse, operand, &self.rotor);
    }
}

/// Rotates a single vector by `angle` radians about `axis` (right-handed).
///
/// Uses owned paravectors; for batches prefer the engine kernels, which reuse
/// one scratch arena for the whole batch.
pub fn rotate_vector(v: &Vector3<f64>, axis: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    let mut unit_axis = OwnedParavector::from_vectors(*axis, Vector3::zeros());
    unit_axis.normalize();

    let mut rotor = OwnedParavector::zeros();
    build_rotor(&mut rotor, &unit_axis, angle);
    let mut rotor_rev = OwnedParavector::zeros();
    rotor_rev.reverse_from(&rotor);

    let operand = OwnedParavector::from_vectors(*v, Vector3::zeros());
    let mut tmp = OwnedParavector::zeros();
    let mut rotated = OwnedParavector::zeros();
    sandwich(&mut rotated, &mut tmp, &rotor_rev, &operand, &rotor);
    rotated.vreal
}
