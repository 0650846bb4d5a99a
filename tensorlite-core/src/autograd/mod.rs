//! Reverse-mode automatic differentiation.
//!
//! Graph construction goes through [`apply`]: an operation runs forward and
//! becomes the producer (`grad_fn`) of the tensor it creates. `Tensor::backward`
//! then walks producer links recursively, each [`BackwardOp`] handing gradient
//! contributions to its inputs.

pub mod backward_op;
pub mod function;
pub mod grad_check;

pub use backward_op::BackwardOp;
pub use function::{apply, Function};
