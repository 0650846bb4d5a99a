// tensorlite-core/src/ops/arithmetic/add.rs

use crate::autograd::{apply, BackwardOp, Function};
use crate::error::TensorLiteError;
use crate::ops::arithmetic::elementwise_kernel;
use crate::tensor::Tensor;
use std::ops::Add;

/// Elementwise addition of two tensors of the same shape.
///
/// The gradient of a sum is the upstream gradient, unchanged, for each
/// operand that requires grad.
#[derive(Debug)]
pub struct AddOp {
    a: Tensor,
    b: Tensor,
}

impl AddOp {
    pub fn new(a: &Tensor, b: &Tensor) -> Self {
        AddOp {
            a: a.clone(),
            b: b.clone(),
        }
    }
}

impl BackwardOp for AddOp {
    fn name(&self) -> &'static str {
        "add"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &[f32]) -> Result<(), TensorLiteError> {
        if self.a.requires_grad() {
            self.a.propagate_grad(grad_output)?;
        }
        if self.b.requires_grad() {
            self.b.propagate_grad(grad_output)?;
        }
        Ok(())
    }
}

impl Function for AddOp {
    fn forward(&self) -> Result<(Vec<f32>, Vec<usize>), TensorLiteError> {
        elementwise_kernel(&self.a, &self.b, "add", |x, y| x + y)
    }
}

// --- Forward Operation ---

/// Performs elementwise addition and records it in the graph.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ; no tensor is created.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorLiteError> {
    apply(AddOp::new(a, b))
}

impl<'a> Add<&'a Tensor> for &'a Tensor {
    type Output = Result<Tensor, TensorLiteError>;

    fn add(self, other: &'a Tensor) -> Self::Output {
        add_op(self, other)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
