use tensorlite_core::tensor::Tensor;

// Helpers shared by the integration test crates.
// Added allow(dead_code) because usage across different test crates isn't detected easily.

/// Installs `env_logger` once; `RUST_LOG=trace` shows the backward traversal.
#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Non-tracking leaf.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

/// Leaf with `requires_grad = true`.
#[allow(dead_code)]
pub(crate) fn create_leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new_with_grad(data, shape, true).expect("Test leaf creation failed")
}
