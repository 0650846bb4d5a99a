//! # Tensor Operations Module (`ops`)
//!
//! Every differentiable operation is a struct implementing
//! [`Function`](crate::autograd::Function): it stores its inputs, computes
//! the forward values, and distributes gradients in `backward`.
//! The `xxx_op` entry points build the struct and hand it to
//! [`apply`](crate::autograd::apply), which returns the new graph node.
//!
//! Operator sugar (`&a + &b`, `&a * &b`) is implemented next to each op and
//! delegates to the same entry points.
//!
//! ## Submodules:
//!
//! - [`arithmetic`]: elementwise arithmetic (add, mul).

pub mod arithmetic;

pub use arithmetic::{add_op, mul_op};
