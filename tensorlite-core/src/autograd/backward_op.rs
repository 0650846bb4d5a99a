use crate::error::TensorLiteError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Every tensor produced by an operation stores its `BackwardOp` in the
/// `grad_fn` field. During `backward()` the output node accumulates its
/// incoming gradient and then hands the same gradient to this trait, which
/// distributes it to the operation's inputs by calling their backward in turn.
///
/// The trait requires `Debug + Send + Sync` because the `Arc<dyn BackwardOp>`
/// is shared by every clone of the output tensor.
pub trait BackwardOp: Debug + Send + Sync {
    /// Short operation name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// The tensors this operation was applied to, in call order.
    fn inputs(&self) -> Vec<Tensor>;

    /// Distributes the gradient of the operation's output to its inputs.
    ///
    /// `grad_output` has the length of the output node. Implementations must
    /// only recurse into inputs whose `requires_grad()` is true, and must
    /// compute each contribution from the values captured at apply time.
    ///
    /// # Errors
    /// Propagates any error raised while an input accumulates or recurses.
    /// Contributions already accumulated by earlier inputs are kept.
    fn backward(&self, grad_output: &[f32]) -> Result<(), TensorLiteError>;
}
