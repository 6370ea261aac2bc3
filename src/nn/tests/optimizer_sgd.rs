use crate::nn::{BatchGradients, Optimizer, SGD};
use crate::tensor::Tensor;

fn gradients(batch_len: usize) -> BatchGradients {
    BatchGradients {
        der_weights: vec![Tensor::new(&[2., 4.], &[1, 2])],
        der_biases: vec![Tensor::new(&[6.], &[1, 1])],
        total_cost: 1.,
        batch_len,
    }
}

#[test]
fn test_sgd_step_averages_over_batch() {
    let mut weights = vec![Tensor::new(&[1., 1.], &[1, 2])];
    let mut biases = vec![Tensor::new(&[1.], &[1, 1])];
    let mut sgd = SGD::new(0.5);
    sgd.step(&mut weights, &mut biases, &gradients(2));

    assert_eq!(weights[0], Tensor::new(&[0.5, 0.], &[1, 2]));
    assert_eq!(biases[0], Tensor::new(&[-0.5], &[1, 1]));
}

#[test]
fn test_sgd_step_with_empty_batch() {
    let mut weights = vec![Tensor::new(&[1., 1.], &[1, 2])];
    let mut biases = vec![Tensor::new(&[1.], &[1, 1])];
    SGD::new(0.5).step(&mut weights, &mut biases, &gradients(0));
    assert_eq!(weights[0], Tensor::new(&[1., 1.], &[1, 2]));
}

#[test]
fn test_sgd_learning_rate() {
    let mut sgd = SGD::new(0.1);
    assert_eq!(sgd.learning_rate(), 0.1);
    sgd.set_learning_rate(0.01);
    assert_eq!(sgd.learning_rate(), 0.01);
}

#[test]
fn test_batch_gradients_merge() {
    let merged = gradients(1).merge(gradients(2));
    assert_eq!(merged.der_weights[0], Tensor::new(&[4., 8.], &[1, 2]));
    assert_eq!(merged.der_biases[0], Tensor::new(&[12.], &[1, 1]));
    assert_eq!(merged.batch_len, 3);
    assert_eq!(merged.mean_cost(), 2. / 3.);

    let zeros = BatchGradients::zeros_like(&merged.der_weights, &merged.der_biases);
    assert_eq!(zeros.der_weights[0], Tensor::zeros(&[1, 2]));
    assert_eq!(zeros.mean_cost(), 0.);
}
