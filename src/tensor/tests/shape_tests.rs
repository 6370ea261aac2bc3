use crate::tensor::Tensor;

#[test]
fn test_reshape_and_to_column() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let reshaped = tensor.reshape(&[3, 2]);
    assert_eq!(reshaped, Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]));
    assert_eq!(tensor.to_column().shape(), &[6, 1]);
}

#[test]
#[should_panic(expected = "张量形状不兼容")]
fn test_reshape_with_incompatible_shape() {
    Tensor::zeros(&[2, 3]).reshape(&[4, 2]);
}

#[test]
fn test_transpose_keeps_row_major_order_for_reshape() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let transposed = tensor.transpose();
    assert_eq!(transposed, Tensor::new(&[1., 4., 2., 5., 3., 6.], &[3, 2]));
    // 转置后再变形，须按新的行优先顺序排列
    assert_eq!(transposed.to_vec(), vec![1., 4., 2., 5., 3., 6.]);
    assert_eq!(transposed.to_column().to_vec(), vec![1., 4., 2., 5., 3., 6.]);
}

#[test]
#[should_panic(expected = "张量阶数不符：期望2阶，实际为3阶")]
fn test_transpose_requires_matrix() {
    Tensor::zeros(&[1, 2, 3]).transpose();
}
