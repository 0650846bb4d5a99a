use crate::autograd::BackwardOp;
use crate::error::TensorLiteError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// A differentiable primitive: a forward computation paired with the
/// gradient rule from [`BackwardOp`].
///
/// Implementors hold their inputs (and whatever forward values their
/// backward rule needs) from construction onward. They are built inside an
/// operator entry point and handed straight to [`apply`].
pub trait Function: BackwardOp + Sized + 'static {
    /// Computes the output values and output shape from the inputs.
    ///
    /// Must be a pure function of the input data.
    fn forward(&self) -> Result<(Vec<f32>, Vec<usize>), TensorLiteError>;
}

/// Runs `function` forward and wires the resulting tensor to it.
///
/// The output requires grad iff any input does, and the function becomes
/// the output's producer. If forward fails, no node is created.
pub fn apply<F: Function>(function: F) -> Result<Tensor, TensorLiteError> {
    let (data, shape) = function.forward()?;
    let requires_grad = function.inputs().iter().any(Tensor::requires_grad);

    let output = Tensor::new_with_grad(data, shape, requires_grad)?;
    log::debug!(
        "{}: built node with shape {:?} (requires_grad = {})",
        function.name(),
        output.shape(),
        requires_grad
    );

    let grad_fn: Arc<dyn BackwardOp> = Arc::new(function);
    output.set_grad_fn(grad_fn);
    Ok(output)
}
