/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 网络搭建与训练配置相关的错误。
 *                 层内部的形状契约错误不在此列，那类错误一律直接panic（见`crate::errors::TensorError`）。
 */

use crate::errors::ComparisonOperator;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: f64,
    },

    #[error("训练样本数{num_observations}不能被批大小{batch_size}整除")]
    RaggedBatch {
        num_observations: usize,
        batch_size: usize,
    },

    #[error("未实现：{0}")]
    NotImplemented(String),

    #[error("网络结构无效：{0}")]
    InvalidTopology(String),

    #[error("{message}：期望{expected:?}，实际为{got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    #[error("配置错误：{0}")]
    Config(String),
}
