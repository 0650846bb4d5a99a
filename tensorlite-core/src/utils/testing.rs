use crate::tensor::Tensor;

/// Checks if two tensors are approximately equal (shape and data within tolerance).
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    check_values_near(&actual.data_vec(), expected_data, tolerance);
}

/// Checks the accumulated gradient of `tensor` against `expected_grad`.
/// Panics if the tensor does not track gradients.
pub fn check_grad_near(tensor: &Tensor, expected_grad: &[f32], tolerance: f32) {
    let grad = tensor
        .grad_vec()
        .expect("Tensor has no gradient (requires_grad = false)");
    check_values_near(&grad, expected_grad, tolerance);
}

fn check_values_near(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "Data length mismatch");

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple f32 tensor for testing purposes.
#[cfg(test)]
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

/// Helper to create a simple f32 tensor that requires gradient for testing.
#[cfg(test)]
pub(crate) fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new_with_grad(data, shape, true).expect("Failed to create test tensor with grad")
}
