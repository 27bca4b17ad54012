//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! This module introduces the trait [`IntoNdArray`], implemented for
//! in-memory Analyze objects, which maps the voxels into an [`Array`] with
//! a dynamic number of dimensions. The element type must be the Rust type
//! of the image's data type; no value conversion takes place.
//!
//! #### Note on memory order
//!
//! Analyze volumes are stored in column major order (also called Fortran
//! order), the first axis varying fastest. The array resulting from this
//! operation is in this memory order as well, rather than the usual row
//! major order (AKA C ordering).
//!
//! [`IntoNdArray`]: ./trait.IntoNdArray.html
//! [`Array`]: ../../../ndarray/type.Array.html
use crate::error::{AnalyzeError, Result};
use crate::object::{AnalyzeObject, InMemAnalyzeObject};
use crate::volume::element::DataElement;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, ShapeBuilder};

/// Trait for objects which can be converted to an ndarray.
///
/// Please see the [module-level documentation](index.html) for more details.
pub trait IntoNdArray {
    /// Consume the object into an ndarray with the same dimensions and the
    /// element type `T`.
    fn into_ndarray<T: DataElement>(self) -> Result<ArrayD<T>>;
}

impl IntoNdArray for InMemAnalyzeObject {
    fn into_ndarray<T: DataElement>(self) -> Result<ArrayD<T>> {
        let dims = self.info().dimensions.clone();
        let data = self.into_vec::<T>()?;
        let len = data.len();
        ArrayD::from_shape_vec(IxDyn(&dims).f(), data)
            .map_err(|_| AnalyzeError::IncompatibleLength(dims.iter().product(), len))
    }
}

/// Collect the elements of an array in column major order, the order in
/// which they are stored in a volume file.
pub fn to_fortran_vec<T, S, D>(array: &ArrayBase<S, D>) -> Vec<T>
where
    T: Clone,
    S: Data<Elem = T>,
    D: Dimension,
{
    array.t().iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    #[test]
    fn fortran_order_of_c_and_f_arrays() {
        let c = Array::from_shape_vec((2, 3), vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(to_fortran_vec(&c), vec![0, 3, 1, 4, 2, 5]);
        let f = Array::from_shape_vec((2, 3).f(), vec![0, 3, 1, 4, 2, 5]).unwrap();
        assert_eq!(f, c);
        assert_eq!(to_fortran_vec(&f), vec![0, 3, 1, 4, 2, 5]);
    }
}
