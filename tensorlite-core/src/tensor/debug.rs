// src/tensor/debug.rs
use crate::tensor::Tensor;
use std::fmt;

/// Number of leading elements shown by `Debug`.
const PREVIEW_LEN: usize = 6;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        let mut preview: Vec<String> = guard
            .buffer
            .iter()
            .take(PREVIEW_LEN)
            .map(|x| format!("{:?}", x))
            .collect();
        if guard.numel() > PREVIEW_LEN {
            preview.push("...".to_string());
        }
        write!(
            f,
            "Tensor(shape={:?}, requires_grad={}, has_grad={}, grad_fn={}, data=[{}])",
            guard.shape,
            guard.requires_grad,
            guard.grad.is_some(),
            guard.grad_fn.as_ref().map_or("None", |op| op.name()),
            preview.join(", ")
        )
    }
}
