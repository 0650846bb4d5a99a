// src/tensor/mod.rs

use crate::error::TensorLiteError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod autograd_methods;
pub mod create;
mod debug;
mod traits;

// Re-export creation functions to make them public
pub use create::{
    from_rows, from_values, full, ones, ones_like, rand, rand_seeded, randn, randn_seeded, scalar,
    zeros, zeros_like,
};

/// A node in the computation graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** clones are cheap and point to the same node, so
///     the same tensor can feed several operations and still be read
///     afterwards by the caller.
/// 2.  **Interior Mutability:** the gradient inside `TensorData` is
///     accumulated during `backward()` through an immutable `Tensor`.
///
/// The forward data never changes once the tensor exists.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a leaf tensor that does not track gradients.
    ///
    /// # Errors
    /// `InvalidTensorData` if `data_vec.len()` is not the product of `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, TensorLiteError> {
        Self::new_with_grad(data_vec, shape, false)
    }

    /// Creates a leaf tensor with an explicit gradient-tracking flag.
    ///
    /// With `requires_grad = true` the gradient starts as all zeros.
    pub fn new_with_grad(
        data_vec: Vec<f32>,
        shape: Vec<usize>,
        requires_grad: bool,
    ) -> Result<Self, TensorLiteError> {
        let tensor_data = TensorData::new(data_vec, shape, requires_grad)?;
        Ok(Self::from_tensor_data(tensor_data))
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the shared forward buffer.
    pub fn buffer(&self) -> Arc<Vec<f32>> {
        Arc::clone(&self.read_data().buffer)
    }

    /// Returns a copy of the forward data in row-major order.
    pub fn data_vec(&self) -> Vec<f32> {
        self.read_data().buffer.as_ref().clone()
    }

    /// Shared buffer and shape, read under a single short lock.
    pub(crate) fn snapshot(&self) -> (Arc<Vec<f32>>, Vec<usize>) {
        let guard = self.read_data();
        (Arc::clone(&guard.buffer), guard.shape.clone())
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// A poisoned lock is recovered: every write leaves `TensorData` whole.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires a write lock on the tensor's data.
    pub(crate) fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stable identity of the underlying node, shared by all clones.
    pub fn id_ptr(&self) -> *const RwLock<TensorData> {
        Arc::as_ptr(&self.data)
    }
}
