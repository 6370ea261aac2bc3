use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_new_and_index() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.size(), 6);
    assert_eq!(tensor.dimension(), 2);
    assert_eq!(tensor[[0, 2]], 3.);
    assert_eq!(tensor[[1, 0]], 4.);
}

#[test]
#[should_panic(expected = "数据长度5与形状[2, 3]不符")]
fn test_new_with_wrong_data_length() {
    Tensor::new(&[1., 2., 3., 4., 5.], &[2, 3]);
}

#[test]
fn test_empty_and_one_hot() {
    let empty = Tensor::empty();
    assert!(empty.is_empty());
    assert_eq!(empty.shape(), &[0]);

    let label = Tensor::one_hot(2, 4);
    assert_eq!(label, Tensor::new(&[0., 0., 1., 0.], &[4, 1]));
    assert_eq!(label.argmax(), Some(2));
}

#[test]
#[should_panic(expected = "class_index须<3")]
fn test_one_hot_out_of_range() {
    Tensor::one_hot(3, 3);
}

#[test]
fn test_new_normal_is_reproducible_with_seed() {
    let a = Tensor::new_normal_with_rng(0., 1., &[3, 5], &mut StdRng::seed_from_u64(42));
    let b = Tensor::new_normal_with_rng(0., 1., &[3, 5], &mut StdRng::seed_from_u64(42));
    let c = Tensor::new_normal_with_rng(0., 1., &[3, 5], &mut StdRng::seed_from_u64(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
    // 奇数个元素时也能正确截断
    assert_eq!(a.size(), 15);
}

#[test]
fn test_new_normal_statistics() {
    let mut rng = StdRng::seed_from_u64(7);
    let tensor = Tensor::new_normal_with_rng(1.0, 0.5, &[100, 100], &mut rng);
    let n = tensor.size() as f64;
    let mean = tensor.sum() / n;
    let var = tensor.map(|x| (x - mean).powi(2)).sum() / n;
    assert!((mean - 1.0).abs() < 0.02, "mean = {mean}");
    assert!((var.sqrt() - 0.5).abs() < 0.02, "std = {}", var.sqrt());
}
