// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::{Arc, PoisonError};

use crate::autograd::BackwardOp;
use crate::error::TensorLiteError;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the forward values, the shape and the autograd
/// bookkeeping of one node in the computation graph.
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct
/// to allow shared ownership and interior mutability of `grad`.
#[derive(Debug)]
pub struct TensorData {
    /// Forward values in row-major order.
    /// Never mutated after construction; wrapped in `Arc` so producers and
    /// detached views can hold on to it without copying.
    pub(crate) buffer: Arc<Vec<f32>>,
    /// The shape (dimensions) of the tensor. `[]` is a scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Set once at construction, never changed afterwards.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, same length as `buffer`.
    /// `Some` iff `requires_grad` is true.
    pub(crate) grad: Option<Vec<f32>>,
    /// The operation that produced this node. Leaf tensors have `None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from f32 data and a shape.
    ///
    /// When `requires_grad` is true the gradient starts as a zero buffer of the
    /// same length, otherwise it stays absent.
    ///
    /// # Errors
    /// Returns `TensorLiteError::InvalidTensorData` if the length of `data_vec`
    /// does not match the number of elements described by `shape`, or if that
    /// number overflows `usize`.
    pub fn new(
        data_vec: Vec<f32>,
        shape: Vec<usize>,
        requires_grad: bool,
    ) -> Result<Self, TensorLiteError> {
        Self::from_buffer(Arc::new(data_vec), shape, requires_grad)
    }

    /// Same as [`TensorData::new`] but reuses an already shared buffer.
    pub(crate) fn from_buffer(
        buffer: Arc<Vec<f32>>,
        shape: Vec<usize>,
        requires_grad: bool,
    ) -> Result<Self, TensorLiteError> {
        let numel = checked_numel(&shape)?;
        if buffer.len() != numel {
            return Err(TensorLiteError::InvalidTensorData {
                reason: format!(
                    "data length {} does not match shape {:?} ({} elements)",
                    buffer.len(),
                    shape,
                    numel
                ),
            });
        }

        let grad = requires_grad.then(|| vec![0.0; numel]);

        Ok(TensorData {
            buffer,
            shape,
            requires_grad,
            grad,
            grad_fn: None,
        })
    }

    /// Provides immutable access to the shared data buffer.
    pub fn buffer(&self) -> &Arc<Vec<f32>> {
        &self.buffer
    }

    /// Element count. The shape was checked against the buffer at construction.
    pub fn numel(&self) -> usize {
        self.buffer.len()
    }

    /// Adds `contribution` elementwise into `grad`.
    ///
    /// Does nothing when the node does not track gradients: there is no
    /// buffer to write into and none is created.
    pub(crate) fn accumulate_grad(&mut self, contribution: &[f32]) -> Result<(), TensorLiteError> {
        let numel = self.numel();
        let Some(grad) = self.grad.as_mut() else {
            return Ok(());
        };
        if contribution.len() != numel || grad.len() != numel {
            return Err(TensorLiteError::InternalError(format!(
                "gradient length {} (stored {}) does not match node with {} elements",
                contribution.len(),
                grad.len(),
                numel
            )));
        }
        grad.iter_mut()
            .zip(contribution.iter())
            .for_each(|(g, &c)| *g += c);
        Ok(())
    }
}

/// Number of elements described by `shape`.
///
/// # Errors
/// `InvalidTensorData` if the product of the dimensions overflows `usize`.
pub(crate) fn checked_numel(shape: &[usize]) -> Result<usize, TensorLiteError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| TensorLiteError::InvalidTensorData {
            reason: format!("shape {:?} overflows usize", shape),
        })
}

impl Drop for TensorData {
    /// Unlinks the producer chain with a worklist.
    ///
    /// Dropping `grad_fn` normally drops its input tensors, whose own
    /// `grad_fn`s drop theirs, one stack frame chain per node. Here every node
    /// this one owns exclusively has its producer taken first, so each nested
    /// drop finds `grad_fn == None` and the stack depth stays constant.
    fn drop(&mut self) {
        let Some(grad_fn) = self.grad_fn.take() else {
            return;
        };
        let mut pending = vec![grad_fn];
        while let Some(mut op) = pending.pop() {
            // Shared producers are only released by their last owner.
            if Arc::get_mut(&mut op).is_none() {
                continue;
            }
            let inputs = op.inputs();
            drop(op);
            for mut input in inputs {
                if let Some(lock) = Arc::get_mut(&mut input.data) {
                    let data = lock.get_mut().unwrap_or_else(PoisonError::into_inner);
                    if let Some(next) = data.grad_fn.take() {
                        pending.push(next);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracking_starts_with_zero_grad() {
        let td = TensorData::new(vec![1.0, 2.0, 3.0], vec![3], true).unwrap();
        assert_eq!(td.grad, Some(vec![0.0, 0.0, 0.0]));
        assert!(td.grad_fn.is_none());
    }

    #[test]
    fn test_new_non_tracking_has_no_grad() {
        let td = TensorData::new(vec![1.0, 2.0], vec![2], false).unwrap();
        assert!(td.grad.is_none());
    }

    #[test]
    fn test_scalar_shape() {
        let td = TensorData::new(vec![4.0], vec![], false).unwrap();
        assert_eq!(td.numel(), 1);
    }

    #[test]
    fn test_length_mismatch() {
        let err = TensorData::new(vec![1.0, 2.0, 3.0], vec![2, 2], false).unwrap_err();
        assert!(matches!(err, TensorLiteError::InvalidTensorData { .. }));
    }

    #[test]
    fn test_shape_overflow_is_rejected() {
        let err = TensorData::new(vec![], vec![1 << (usize::BITS - 1), 2], false).unwrap_err();
        match err {
            TensorLiteError::InvalidTensorData { reason } => assert!(reason.contains("overflows")),
            e => panic!("Expected InvalidTensorData, got {:?}", e),
        }
        assert!(checked_numel(&[usize::MAX, 0]).is_ok());
        assert_eq!(checked_numel(&[]).unwrap(), 1);
    }

    #[test]
    fn test_accumulate_adds() {
        let mut td = TensorData::new(vec![1.0, 2.0], vec![2], true).unwrap();
        td.accumulate_grad(&[1.0, 2.0]).unwrap();
        td.accumulate_grad(&[0.5, 0.5]).unwrap();
        assert_eq!(td.grad, Some(vec![1.5, 2.5]));
    }

    #[test]
    fn test_accumulate_skipped_without_tracking() {
        let mut td = TensorData::new(vec![1.0, 2.0], vec![2], false).unwrap();
        td.accumulate_grad(&[1.0, 2.0]).unwrap();
        assert!(td.grad.is_none());
    }

    #[test]
    fn test_accumulate_wrong_length() {
        let mut td = TensorData::new(vec![1.0, 2.0], vec![2], true).unwrap();
        let err = td.accumulate_grad(&[1.0]).unwrap_err();
        assert!(matches!(err, TensorLiteError::InternalError(_)));
        assert_eq!(td.grad, Some(vec![0.0, 0.0]));
    }
}
