/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : XOR（异或）问题测试 - 经典的非线性分类问题，需要隐藏层+非线性激活才能解决
 *                 网络结构：Input(2) -> FC(8, Tanh) -> FC(2, Sigmoid)，交叉熵代价
 */
use only_net::nn::{
    test, Activation, Cost, FullyConnectedLayer, InputLayer, Network, NetworkError, Observation,
    TrainConfig, Trainer,
};
use only_net::tensor::Tensor;

/// XOR问题训练数据：(0,0)->0, (0,1)->1, (1,0)->1, (1,1)->0，标签为1-of-2编码
fn get_xor_data() -> Vec<Observation> {
    [
        ([0.0, 0.0], 0),
        ([0.0, 1.0], 1),
        ([1.0, 0.0], 1),
        ([1.0, 1.0], 0),
    ]
    .iter()
    .map(|(x, class_index)| (Tensor::new(x, &[2, 1]), Tensor::one_hot(*class_index, 2)))
    .collect()
}

#[test]
fn test_xor() -> Result<(), NetworkError> {
    let start_time = std::time::Instant::now();

    let mut network = Network::new_with_seed(
        InputLayer::new(2, 1),
        vec![
            FullyConnectedLayer::new(8, Activation::Tanh).into(),
            FullyConnectedLayer::new(2, Activation::Sigmoid).into(),
        ],
        Cost::CrossEntropy,
        42,
    )?;

    // 每个样本重复25次，凑成100个训练样本
    let mut train_data: Vec<Observation> = get_xor_data()
        .into_iter()
        .flat_map(|observation| std::iter::repeat_n(observation, 25))
        .collect();

    let config = TrainConfig::new()
        .num_epochs(300)
        .batch_size(10)
        .learning_rate(0.5)
        .seed(42);
    let history = Trainer::new(config).train(&mut network, &mut train_data)?;

    let evaluation = test(&network, &get_xor_data());
    println!(
        "XOR：{}，最终损失：{:.6}，耗时：{:.2?}",
        evaluation,
        history[history.len() - 1].mean_loss,
        start_time.elapsed()
    );
    assert_eq!(evaluation.correct, 4);
    Ok(())
}
