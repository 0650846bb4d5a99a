use crate::autograd::BackwardOp;
use crate::error::TensorLiteError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// A leaf has no producer: it was created directly, not by an operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns a clone of the `Arc` pointing to the producer (`grad_fn`).
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Attaches the producer of this tensor. Only `autograd::apply` calls this,
    /// once, right after the producer's forward pass.
    pub(crate) fn set_grad_fn(&self, grad_fn: Arc<dyn BackwardOp>) {
        let mut guard = self.write_data();
        if let Some(previous) = guard.grad_fn.as_ref() {
            log::warn!(
                "Replacing producer {} with {} on an already linked tensor",
                previous.name(),
                grad_fn.name()
            );
        }
        guard.grad_fn = Some(grad_fn);
    }

    /// Returns the accumulated gradient as a new, non-tracking tensor.
    ///
    /// # Errors
    /// `UninitializedGradient` if this tensor was created without gradient
    /// tracking. A zero tensor is never returned in that case.
    pub fn grad(&self) -> Result<Tensor, TensorLiteError> {
        let guard = self.read_data();
        let grad = guard
            .grad
            .as_ref()
            .ok_or(TensorLiteError::UninitializedGradient)?;
        Tensor::new(grad.clone(), guard.shape.clone())
    }

    /// Returns a copy of the accumulated gradient values.
    pub fn grad_vec(&self) -> Result<Vec<f32>, TensorLiteError> {
        self.read_data()
            .grad
            .clone()
            .ok_or(TensorLiteError::UninitializedGradient)
    }

    /// Resets the accumulated gradient to zeros. No-op without tracking.
    pub fn zero_grad(&self) {
        if let Some(grad) = self.write_data().grad.as_mut() {
            grad.fill(0.0);
        }
    }

    /// Creates a new leaf tensor that shares the same data but is detached
    /// from the computation graph and does not track gradients.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached_data = TensorData {
            buffer: Arc::clone(&guard.buffer),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Tensor::from_tensor_data(detached_data)
    }

    /// Propagates gradient into this tensor and every ancestor that requires it.
    ///
    /// # Arguments
    /// * `gradient`: seed gradient for this tensor. If `None`, a tensor of ones
    ///   with this tensor's shape is used (unit upstream gradient, the usual
    ///   convention for a scalar loss).
    ///
    /// Gradients accumulate: calling `backward` twice with the same seed
    /// doubles every gradient reached. Calling it on a tensor that does not
    /// require grad does nothing.
    ///
    /// # Errors
    /// `ShapeMismatch` if `gradient` does not have this tensor's shape; in that
    /// case nothing is accumulated anywhere.
    pub fn backward(&self, gradient: Option<&Tensor>) -> Result<(), TensorLiteError> {
        if !self.requires_grad() {
            log::debug!("backward() called on a tensor that does not require grad. Nothing to do.");
            return Ok(());
        }

        let shape = self.shape();
        let seed = match gradient {
            Some(g) => {
                let g_shape = g.shape();
                if g_shape != shape {
                    return Err(TensorLiteError::ShapeMismatch {
                        expected: shape,
                        actual: g_shape,
                        operation: "backward".to_string(),
                    });
                }
                g.buffer()
            }
            None => Arc::new(vec![1.0; shape.iter().product()]),
        };

        log::debug!("backward: starting from node with shape {:?}", shape);
        self.propagate_grad(&seed)
    }

    /// Accumulates `grad` into this tensor, then forwards it to the producer.
    ///
    /// This is the recursion step of the backward pass, called by
    /// `backward()` on the root and by every [`BackwardOp`] on its inputs.
    /// Tensors that do not require grad are skipped entirely.
    pub fn propagate_grad(&self, grad: &[f32]) -> Result<(), TensorLiteError> {
        let grad_fn = {
            let mut guard = self.write_data();
            if !guard.requires_grad {
                return Ok(());
            }
            guard.accumulate_grad(grad)?;
            log::trace!(
                "accumulated gradient into node {:?} (shape {:?})",
                self.id_ptr(),
                guard.shape
            );
            guard.grad_fn.clone()
        };

        // The write lock is released before recursing so that an input shared
        // by several paths can be reached again further down.
        if let Some(op) = grad_fn {
            log::trace!("propagating through {}", op.name());
            op.backward(grad)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
