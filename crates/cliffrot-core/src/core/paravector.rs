use nalgebra::Vector3;
use std::borrow::{Borrow, BorrowMut};

/// An element of the Pauli algebra of 3D space, stored as a complex scalar
/// (`real`, `imag`) and a complex vector (`vreal`, `vimag`).
///
/// The vector parts are generic over their storage so that a paravector can
/// either own its vectors or act as a view over rows that live elsewhere
/// (a scratch arena, a source matrix, a destination matrix):
///
/// - [`OwnedParavector`] owns two `Vector3<f64>` values.
/// - [`ParavectorView`] borrows two rows mutably and writes results into them.
/// - [`ParavectorRef`] borrows two rows immutably, e.g. to embed a source row.
///
/// A view never outlives the rows it borrows, and two live views can never
/// share a row mutably.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paravector<V> {
    pub real: f64,
    pub imag: f64,
    pub vreal: V,
    pub vimag: V,
}

pub type OwnedParavector = Paravector<Vector3<f64>>;
pub type ParavectorView<'a> = Paravector<&'a mut Vector3<f64>>;
pub type ParavectorRef<'a> = Paravector<&'a Vector3<f64>>;

impl OwnedParavector {
    pub fn zeros() -> Self {
        Self::from_vectors(Vector3::zeros(), Vector3::zeros())
    }
}

impl<V> Paravector<V> {
    /// Wraps two vectors as the vector parts of a paravector with zero scalar parts.
    pub fn from_vectors(vreal: V, vimag: V) -> Self {
        Self {
            real: 0.0,
            imag: 0.0,
            vreal,
            vimag,
        }
    }
}

impl<'a> ParavectorView<'a> {
    /// Gives up write access, keeping the borrow of the underlying rows.
    pub fn freeze(self) -> ParavectorRef<'a> {
        Paravector {
            real: self.real,
            imag: self.imag,
            vreal: self.vreal,
            vimag: self.vimag,
        }
    }
}

impl<V: Borrow<Vector3<f64>>> Paravector<V> {
    #[inline]
    pub fn vreal(&self) -> &Vector3<f64> {
        self.vreal.borrow()
    }

    #[inline]
    pub fn vimag(&self) -> &Vector3<f64> {
        self.vimag.borrow()
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.real * self.real
            + self.imag * self.imag
            + self.vreal().norm_squared()
            + self.vimag().norm_squared()
    }

    /// The complete Clifford product `self · rhs`, including the imaginary
    /// vector part that [`Paravector::cli_product`] leaves out.
    pub fn full_product<W: Borrow<Vector3<f64>>>(&self, rhs: &Paravector<W>) -> OwnedParavector {
        let mut product = OwnedParavector::zeros();
        product.cli_product(self, rhs);

        let (ar, ai, avr, avi) = (self.real, self.imag, self.vreal(), self.vimag());
        let (br, bi, bvr, bvi) = (rhs.real, rhs.imag, rhs.vreal(), rhs.vimag());
        product.vimag = bvi * ar + avi * br + bvr * ai - avr * bi + avr.cross(bvr) - avi.cross(bvi);
        product
    }
}

impl<V: BorrowMut<Vector3<f64>>> Paravector<V> {
    #[inline]
    pub fn vreal_mut(&mut self) -> &mut Vector3<f64> {
        self.vreal.borrow_mut()
    }

    #[inline]
    pub fn vimag_mut(&mut self) -> &mut Vector3<f64> {
        self.vimag.borrow_mut()
    }

    /// Overwrites the scalars and the contents of the vector rows with those of `src`.
    /// The rows this paravector points at are not rebound.
    pub fn copy_from<W: Borrow<Vector3<f64>>>(&mut self, src: &Paravector<W>) {
        self.real = src.real;
        self.imag = src.imag;
        self.vreal_mut().copy_from(src.vreal());
        self.vimag_mut().copy_from(src.vimag());
    }

    /// Clifford reversion in place: negates the imaginary vector part.
    pub fn reverse(&mut self) {
        self.vimag_mut().neg_mut();
    }

    pub fn reverse_from<W: Borrow<Vector3<f64>>>(&mut self, src: &Paravector<W>) {
        self.copy_from(src);
        self.reverse();
    }

    /// Divides every component by the paravector norm.
    ///
    /// A zero paravector is not special-cased: the division yields NaN components.
    pub fn normalize(&mut self) {
        let norm = self.norm_squared().sqrt();
        self.real /= norm;
        self.imag /= norm;
        *self.vreal_mut() /= norm;
        *self.vimag_mut() /= norm;
    }

    pub fn unit_from<W: Borrow<Vector3<f64>>>(&mut self, src: &Paravector<W>) {
        self.copy_from(src);
        self.normalize();
    }

    /// Clifford product `a · b` restricted to what rotating real vectors needs.
    ///
    /// Writes the scalar parts and the real vector part. The imaginary vector part
    /// of `self` is left untouched. The result is exact only when both operands
    /// have a zero imaginary vector part, or when the caller discards any
    /// contribution that would flow through it. Rotors and embedded real vectors
    /// satisfy this for both halves of the sandwich product.
    #[inline]
    pub fn cli_product<A, B>(&mut self, a: &Paravector<A>, b: &Paravector<B>)
    where
        A: Borrow<Vector3<f64>>,
        B: Borrow<Vector3<f64>>,
    {
        let (ar, ai, avr, avi) = (a.real, a.imag, a.vreal(), a.vimag());
        let (br, bi, bvr, bvi) = (b.real, b.imag, b.vreal(), b.vimag());

        self.real = ar * br - ai * bi + avr.dot(bvr) - avi.dot(bvi);
        self.imag = ar * bi + ai * br + avr.dot(bvi) + avi.dot(bvr);

        let vreal = bvr * ar + avr * br - bvi * ai - avi * bi - avi.cross(bvr) - avr.cross(bvi);
        self.vreal_mut().copy_from(&vreal);
    }
}
