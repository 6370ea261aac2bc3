use crate::nn::{test, Activation, Cost, Evaluation, FullyConnectedLayer, InputLayer, Network};
use crate::tensor::Tensor;

/// 输出恒为第`class_index`类的网络
fn constant_network(class_index: usize) -> Network {
    let mut network = Network::new_with_seed(
        InputLayer::new(2, 1),
        vec![FullyConnectedLayer::new(3, Activation::Sigmoid).into()],
        Cost::MeanSquared,
        0,
    )
    .unwrap();
    network
        .set_parameters(0, Tensor::zeros(&[3, 2]), Tensor::one_hot(class_index, 3) * 10.)
        .unwrap();
    network
}

#[test]
fn test_evaluation() {
    let network = constant_network(2);
    let observations: Vec<_> = (0..5)
        .map(|i| (Tensor::new(&[i as f64, 1.], &[2, 1]), Tensor::one_hot(2, 3)))
        .collect();
    let evaluation = test(&network, &observations);
    assert_eq!(evaluation, Evaluation { correct: 5, total: 5 });
    assert_eq!(evaluation.percentage(), 100.);
    assert_eq!(
        evaluation.to_string(),
        "5 correctly classified observations (100%)"
    );

    let mut mixed = observations.clone();
    mixed.push((Tensor::new(&[0., 0.], &[2, 1]), Tensor::one_hot(0, 3)));
    mixed.push((Tensor::new(&[0., 0.], &[2, 1]), Tensor::one_hot(1, 3)));
    mixed.push((Tensor::new(&[0., 0.], &[2, 1]), Tensor::one_hot(1, 3)));
    let evaluation = test(&network, &mixed);
    assert_eq!(evaluation.correct, 5);
    assert_eq!(evaluation.percentage(), 62.5);
}

#[test]
fn test_evaluation_does_not_modify_network() {
    let network = constant_network(0);
    let before = network.weights(0).clone();
    test(&network, &[(Tensor::zeros(&[2, 1]), Tensor::one_hot(0, 3))]);
    assert_eq!(network.weights(0), &before);
}

#[test]
fn test_evaluation_on_empty_set() {
    let evaluation = test(&constant_network(0), &[]);
    assert_eq!(evaluation, Evaluation { correct: 0, total: 0 });
    assert_eq!(evaluation.percentage(), 0.);
}
