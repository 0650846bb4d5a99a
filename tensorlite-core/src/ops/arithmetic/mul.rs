use crate::autograd::{apply, BackwardOp, Function};
use crate::error::TensorLiteError;
use crate::ops::arithmetic::elementwise_kernel;
use crate::tensor::Tensor;
use std::ops::Mul;
use std::sync::Arc;

// --- Operation Structure ---

/// Elementwise multiplication of two tensors of the same shape.
///
/// Keeps both operands' forward buffers: the gradient for one operand is
/// the upstream gradient times the *other* operand's original values.
#[derive(Debug)]
pub struct MulOp {
    a: Tensor,
    b: Tensor,
    a_data: Arc<Vec<f32>>,
    b_data: Arc<Vec<f32>>,
}

impl MulOp {
    pub fn new(a: &Tensor, b: &Tensor) -> Self {
        MulOp {
            a: a.clone(),
            b: b.clone(),
            a_data: a.buffer(),
            b_data: b.buffer(),
        }
    }
}

fn scale(grad_output: &[f32], factor: &[f32]) -> Vec<f32> {
    grad_output
        .iter()
        .zip(factor.iter())
        .map(|(&g, &f)| g * f)
        .collect()
}

// --- Backward Operation Implementation ---

impl BackwardOp for MulOp {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &[f32]) -> Result<(), TensorLiteError> {
        // grad_a = grad_output * b
        if self.a.requires_grad() {
            self.a.propagate_grad(&scale(grad_output, &self.b_data))?;
        }
        // grad_b = grad_output * a
        if self.b.requires_grad() {
            self.b.propagate_grad(&scale(grad_output, &self.a_data))?;
        }
        Ok(())
    }
}

impl Function for MulOp {
    fn forward(&self) -> Result<(Vec<f32>, Vec<usize>), TensorLiteError> {
        elementwise_kernel(&self.a, &self.b, "mul", |x, y| x * y)
    }
}

// --- Forward Operation ---

/// Performs elementwise multiplication and records it in the graph.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ; no tensor is created.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorLiteError> {
    apply(MulOp::new(a, b))
}

impl<'a> Mul<&'a Tensor> for &'a Tensor {
    type Output = Result<Tensor, TensorLiteError>;

    fn mul(self, other: &'a Tensor) -> Self::Output {
        mul_op(self, other)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
