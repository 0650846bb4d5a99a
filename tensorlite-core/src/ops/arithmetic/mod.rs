// Foundational elementwise arithmetic operations
pub mod add;
pub mod mul;

pub use add::{add_op, AddOp};
pub use mul::{mul_op, MulOp};

use crate::error::TensorLiteError;
use crate::tensor::Tensor;

/// Applies `op` pairwise to the data of two tensors of identical shape.
///
/// No broadcasting: differing shapes fail with `ShapeMismatch`, reporting
/// the left shape as expected and the right shape as actual.
pub(crate) fn elementwise_kernel<F>(
    a: &Tensor,
    b: &Tensor,
    operation: &str,
    op: F,
) -> Result<(Vec<f32>, Vec<usize>), TensorLiteError>
where
    F: Fn(f32, f32) -> f32,
{
    // Separate short locks: `a` and `b` may be the same node.
    let (a_data, a_shape) = a.snapshot();
    let (b_data, b_shape) = b.snapshot();

    if a_shape != b_shape {
        return Err(TensorLiteError::ShapeMismatch {
            expected: a_shape,
            actual: b_shape,
            operation: operation.to_string(),
        });
    }

    let result_data = a_data
        .iter()
        .zip(b_data.iter())
        .map(|(&x, &y)| op(x, y))
        .collect();
    Ok((result_data, a_shape))
}
