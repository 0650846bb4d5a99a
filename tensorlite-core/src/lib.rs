//! Minimal reverse-mode automatic differentiation over `f32` tensors.
//!
//! Tensors are combined with [`ops::add_op`] / [`ops::mul_op`] (or `&a + &b`,
//! `&a * &b`); every result remembers the operation that produced it, and a
//! single [`Tensor::backward`] call accumulates gradients into every tensor
//! created with `requires_grad = true`.
//!
//! ```
//! use tensorlite_core::{Tensor, TensorLiteError};
//!
//! # fn main() -> Result<(), TensorLiteError> {
//! let a = Tensor::new_with_grad(vec![2.0], vec![1], true)?;
//! let b = Tensor::new_with_grad(vec![3.0], vec![1], true)?;
//! let d = (&a * &b)?;
//! d.backward(None)?;
//! assert_eq!(a.grad_vec()?, vec![3.0]);
//! assert_eq!(b.grad_vec()?, vec![2.0]);
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

// Re-exports the Tensor type so it is reachable as `tensorlite_core::Tensor`
pub use error::TensorLiteError;
pub use tensor::Tensor;
