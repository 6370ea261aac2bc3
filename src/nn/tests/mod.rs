mod evaluator;
mod layer_fully_connected;
mod optimizer_sgd;

use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 测试用的固定种子随机张量，元素服从 N(0, 1)
fn random_tensor(shape: &[usize], seed: u64) -> Tensor {
    Tensor::new_normal_with_rng(0.0, 1.0, shape, &mut StdRng::seed_from_u64(seed))
}
