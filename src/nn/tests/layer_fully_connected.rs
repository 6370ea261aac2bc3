use crate::nn::{Activation, ForwardRecord, FullyConnectedLayer, InputLayer, Layer, TraitLayer};
use crate::tensor::Tensor;

fn input_layer(n: usize) -> Layer {
    Layer::from(InputLayer::new(n, 1))
}

#[test]
fn test_fully_connected_shape_and_display() {
    let layer = Layer::from(FullyConnectedLayer::new(3, Activation::Sigmoid));
    assert_eq!((layer.depth(), layer.height(), layer.width()), (1, 3, 1));
    assert_eq!(layer.num_neurons_out(), 3);
    assert_eq!(layer.activation(), Some(Activation::Sigmoid));
    assert!(layer.supports_param_init());
    assert_eq!(
        layer.param_shapes(&input_layer(5)),
        Some((vec![3, 5], vec![3, 1]))
    );
    assert_eq!(
        layer.to_string(),
        "FullyConnectedLayer(activation: sigmoid, depth: 1, height: 3, num_neurons_out: 3, width: 1)"
    );
}

#[test]
fn test_fully_connected_feedforward() {
    let prev = input_layer(3);
    let layer = FullyConnectedLayer::new(2, Activation::Identity);
    let weights = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let record = ForwardRecord::input(Tensor::new(&[1., 2., 3.], &[3, 1]));

    let out = layer.feedforward(&prev, &record, &weights, &Tensor::zeros(&[2, 1]));
    assert_eq!(out.z, Some(Tensor::new(&[14., 32.], &[2, 1])));
    assert_eq!(out.a, out.z.clone().unwrap());

    let biases = Tensor::new(&[0.5, -1.], &[2, 1]);
    let out = layer.feedforward(&prev, &record, &weights, &biases);
    assert_eq!(out.a, Tensor::new(&[14.5, 31.], &[2, 1]));
}

#[test]
fn test_fully_connected_activation_applies_to_z() {
    let prev = input_layer(3);
    let layer = FullyConnectedLayer::new(2, Activation::Sigmoid);
    let weights = Tensor::new(&[0.1, -0.2, 0.3, 0.4, 0.5, -0.6], &[2, 3]);
    let biases = Tensor::new(&[0.1, 0.2], &[2, 1]);
    // 行向量形式的输入也会被展平为列向量
    let record = ForwardRecord::input(Tensor::new(&[1., 2., 3.], &[1, 3]));

    let out = layer.feedforward(&prev, &record, &weights, &biases);
    let z = out.z.unwrap();
    assert!(z.is_same_shape(&out.a));
    assert_eq!(out.a, Activation::Sigmoid.apply(&z));
}

#[test]
fn test_fully_connected_backpropagate() {
    let prev = input_layer(3);
    let layer = FullyConnectedLayer::new(2, Activation::Identity);
    let weights = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let record = ForwardRecord::input(Tensor::new(&[1., 2., 3.], &[3, 1]));
    let delta_z = Tensor::new(&[1., -1.], &[2, 1]);

    let gradients = layer.backpropagate(&prev, &record, &weights, &delta_z);
    assert_eq!(
        gradients.der_weights,
        Tensor::new(&[1., 2., 3., -1., -2., -3.], &[2, 3])
    );
    assert_eq!(gradients.der_biases, delta_z);
    // 输入层没有预激活值，误差原样是 Wᵀ·δ
    assert_eq!(gradients.delta_z_prev, Tensor::new(&[-3., -3., -3.], &[3, 1]));
}

#[test]
fn test_fully_connected_backpropagate_uses_prev_activation() {
    let prev = Layer::from(FullyConnectedLayer::new(2, Activation::ReLU));
    let layer = FullyConnectedLayer::new(1, Activation::Identity);
    let weights = Tensor::new(&[2., 3.], &[1, 2]);
    let prev_z = Tensor::new(&[-1., 4.], &[2, 1]);
    let record = ForwardRecord::new(prev_z.clone(), Activation::ReLU.apply(&prev_z));

    let gradients = layer.backpropagate(&prev, &record, &weights, &Tensor::new(&[1.], &[1, 1]));
    // ReLU'(-1) = 0，ReLU'(4) = 1
    assert_eq!(gradients.delta_z_prev, Tensor::new(&[0., 3.], &[2, 1]));
    assert_eq!(gradients.der_weights, Tensor::new(&[0., 4.], &[1, 2]));
}

#[test]
#[should_panic(expected = "全连接层的输入元素数2与上一层的神经元数3不符")]
fn test_fully_connected_with_wrong_input_size() {
    let layer = FullyConnectedLayer::new(2, Activation::Sigmoid);
    let record = ForwardRecord::input(Tensor::zeros(&[2, 1]));
    layer.feedforward(
        &input_layer(3),
        &record,
        &Tensor::zeros(&[2, 3]),
        &Tensor::zeros(&[2, 1]),
    );
}

#[test]
#[should_panic(expected = "全连接层的权重的形状不符：期望[2, 3]，实际为[3, 2]")]
fn test_fully_connected_with_wrong_weights() {
    let layer = FullyConnectedLayer::new(2, Activation::Sigmoid);
    let record = ForwardRecord::input(Tensor::zeros(&[3, 1]));
    layer.feedforward(
        &input_layer(3),
        &record,
        &Tensor::zeros(&[3, 2]),
        &Tensor::zeros(&[2, 1]),
    );
}

#[test]
#[should_panic(expected = "全连接层的误差的形状不符")]
fn test_fully_connected_with_wrong_delta() {
    let layer = FullyConnectedLayer::new(2, Activation::Sigmoid);
    let record = ForwardRecord::input(Tensor::zeros(&[3, 1]));
    layer.backpropagate(
        &input_layer(3),
        &record,
        &Tensor::zeros(&[2, 3]),
        &Tensor::zeros(&[3, 1]),
    );
}
