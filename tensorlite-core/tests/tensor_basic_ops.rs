use tensorlite_core::ops::{add_op, mul_op};
use tensorlite_core::utils::testing::check_tensor_near;
use tensorlite_core::TensorLiteError;

mod common;
use common::{create_leaf, create_test_tensor};

#[test]
fn test_forward_values() {
    let a = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor(vec![4.0, 5.0, 6.0], vec![3]);
    check_tensor_near(&add_op(&a, &b).unwrap(), &[3], &[5.0, 7.0, 9.0], 1e-6);
    check_tensor_near(&mul_op(&a, &b).unwrap(), &[3], &[4.0, 10.0, 18.0], 1e-6);
}

#[test]
fn test_operators_match_named_entry_points() {
    let a = create_test_tensor(vec![1.0, -2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 0.5], vec![2]);
    assert_eq!((&a + &b).unwrap(), add_op(&a, &b).unwrap());
    assert_eq!((&a * &b).unwrap(), mul_op(&a, &b).unwrap());
}

#[test]
fn test_shape_mismatch_builds_no_node() {
    let a = create_leaf(vec![1.0, 2.0], vec![2]);
    let b = create_leaf(vec![1.0, 2.0], vec![1, 2]);

    for result in [add_op(&a, &b), mul_op(&a, &b)] {
        assert!(matches!(result, Err(TensorLiteError::ShapeMismatch { .. })));
    }
    // Nothing was linked to the operands either.
    assert!(a.is_leaf() && b.is_leaf());
    assert_eq!(a.grad_vec().unwrap(), vec![0.0, 0.0]);
}

#[test]
fn test_results_are_non_leaf_with_producer() {
    let a = create_leaf(vec![1.0], vec![1]);
    let b = create_test_tensor(vec![2.0], vec![1]);
    let c = mul_op(&a, &b).unwrap();
    assert!(!c.is_leaf());
    assert_eq!(c.grad_fn().map(|op| op.name()), Some("mul"));
    assert!(c.requires_grad());
}

#[test]
fn test_scalar_shaped_operands() {
    let a = tensorlite_core::tensor::create::scalar(2.0, true).unwrap();
    let b = tensorlite_core::tensor::create::scalar(4.0, true).unwrap();
    let c = mul_op(&a, &b).unwrap();
    assert!(c.shape().is_empty());
    c.backward(None).unwrap();
    assert_eq!(a.grad_vec().unwrap(), vec![4.0]);
}
