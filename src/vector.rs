use std::ops::AddAssign;

use crate::error::{BayesError, Result};

/// Adds `rhs` into `lhs` element by element. Both slices must have the same length.
pub fn add_assign<T>(lhs: &mut [T], rhs: &[T]) -> Result<()>
where
    T: AddAssign + Copy,
{
    if lhs.len() != rhs.len() {
        return Err(BayesError::LengthMismatch {
            expected: lhs.len(),
            actual: rhs.len(),
        });
    }

    lhs.iter_mut().zip(rhs).for_each(|(a, &b)| *a += b);
    Ok(())
}
