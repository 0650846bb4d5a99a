// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: the new handle points to the same graph node, so
    /// gradients accumulated through one clone are visible through the other.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal when they have the same shape and forward data.
    /// Gradients and producers are not compared.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let self_guard = self.read_data();
        let other_guard = other.read_data();
        self_guard.shape == other_guard.shape && self_guard.buffer == other_guard.buffer
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::Tensor;

    #[test]
    fn test_clone_shares_node() {
        let a = Tensor::new_with_grad(vec![1.0], vec![1], true).unwrap();
        let a2 = a.clone();
        a2.backward(None).unwrap();
        assert_eq!(a.grad_vec().unwrap(), vec![1.0]);
        assert_eq!(a.id_ptr(), a2.id_ptr());
    }

    #[test]
    fn test_equality_by_value() {
        let t1 = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let t2 = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
        let t3 = Tensor::new(vec![1.0, 2.5], vec![2]).unwrap();
        let t4 = Tensor::new(vec![1.0, 2.0], vec![1, 2]).unwrap();
        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
        assert_ne!(t1, t4);
    }
}
