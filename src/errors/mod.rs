use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 张量及层的形状/契约错误。
/// 这类错误只会出现在网络搭建有误时，故一律配合`assert!`使用（直接panic），不做恢复。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 数字比较用
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("数据长度{data_len}与形状{shape:?}不符")]
    DataLengthMismatch { shape: Vec<usize>, data_len: usize },
    #[error("张量形状不兼容：无法从{from:?}变形为{to:?}")]
    IncompatibleShape { from: Vec<usize>, to: Vec<usize> },
    #[error("张量阶数不符：期望{expected}阶，实际为{got}阶")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("{what}的形状不符：期望{expected:?}，实际为{got:?}")]
    ShapeMismatch {
        what: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
}
