use super::*;
use crate::utils::testing::{
    check_grad_near, check_tensor_near, create_test_tensor, create_test_tensor_with_grad,
};

#[test]
fn test_add_tensors_ok() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);

    let result = add_op(&t1, &t2).unwrap();

    check_tensor_near(&result, &[2, 2], &[6.0, 8.0, 10.0, 12.0], 1e-6);
    assert!(!result.requires_grad());
}

#[test]
fn test_add_operator_sugar() {
    let t1 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_test_tensor(vec![0.5, 0.5], vec![2]);
    let result = (&t1 + &t2).unwrap();
    assert_eq!(result, add_op(&t1, &t2).unwrap());
}

#[test]
fn test_add_tensors_shape_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0], vec![2, 3]);

    match add_op(&t1, &t2) {
        Err(TensorLiteError::ShapeMismatch { expected, actual, operation }) => {
            assert_eq!(expected, vec![2, 2]);
            assert_eq!(actual, vec![2, 3]);
            assert_eq!(operation, "add");
        }
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_add_no_broadcasting() {
    let matrix = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let row = create_test_tensor(vec![10.0, 20.0], vec![1, 2]);
    assert!(matches!(
        add_op(&matrix, &row),
        Err(TensorLiteError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_add_propagate_requires_grad() {
    let t1 = create_test_tensor(vec![1.0], vec![1]);
    let t2 = create_test_tensor_with_grad(vec![2.0], vec![1]);
    let t3 = create_test_tensor(vec![3.0], vec![1]);

    assert!(add_op(&t1, &t2).unwrap().requires_grad());
    assert!(add_op(&t2, &t1).unwrap().requires_grad());
    assert!(!add_op(&t1, &t3).unwrap().requires_grad());
}

#[test]
fn test_add_backward() -> Result<(), TensorLiteError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor_with_grad(vec![4.0, 5.0, 6.0], vec![3]);
    let result = add_op(&a, &b)?;

    result.backward(None)?;

    check_grad_near(&a, &[1.0, 1.0, 1.0], 1e-6);
    check_grad_near(&b, &[1.0, 1.0, 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_backward_passes_seed_unchanged() -> Result<(), TensorLiteError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor(vec![4.0, 5.0], vec![2]);
    let result = add_op(&a, &b)?;

    let seed = create_test_tensor(vec![0.5, -3.0], vec![2]);
    result.backward(Some(&seed))?;

    check_grad_near(&a, &[0.5, -3.0], 1e-6);
    assert_eq!(b.grad().unwrap_err(), TensorLiteError::UninitializedGradient);
    Ok(())
}

#[test]
fn test_add_same_operand_twice() -> Result<(), TensorLiteError> {
    let a = create_test_tensor_with_grad(vec![1.5], vec![1]);
    let result = add_op(&a, &a)?;
    check_tensor_near(&result, &[1], &[3.0], 1e-6);

    result.backward(None)?;
    check_grad_near(&a, &[2.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_backward_op_inputs() {
    let a = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let b = create_test_tensor(vec![2.0], vec![1]);
    let result = add_op(&a, &b).unwrap();
    let grad_fn = result.grad_fn().unwrap();
    let inputs = grad_fn.inputs();
    assert_eq!(grad_fn.name(), "add");
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].id_ptr(), a.id_ptr());
    assert_eq!(inputs[1].id_ptr(), b.id_ptr());
}
