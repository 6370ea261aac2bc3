/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 训练配置，可由 JSON 反序列化得到
 */

use crate::errors::ComparisonOperator;
use crate::nn::NetworkError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// 训练轮数
    pub num_epochs: usize,
    /// 每个批次的样本数，须整除训练集大小
    pub batch_size: usize,
    /// 学习率，须 > 0
    pub learning_rate: f64,
    /// 打乱样本用的随机种子；`None`则每次不同
    pub seed: Option<u64>,
    /// 是否在批次内并行计算各样本的梯度
    pub parallel: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_epochs: 30,
            batch_size: 10,
            learning_rate: 3.0,
            seed: None,
            parallel: false,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = num_epochs;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        serde_json::from_str(json).map_err(|e| NetworkError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            NetworkError::Config(format!("无法读取{}：{e}", path.as_ref().display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, NetworkError> {
        serde_json::to_string_pretty(self).map_err(|e| NetworkError::Config(e.to_string()))
    }

    /// 训练前的前置条件检查：学习率 > 0，批大小 > 0 且整除样本数
    pub fn validate(&self, num_observations: usize) -> Result<(), NetworkError> {
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 || self.learning_rate.is_infinite() {
            return Err(NetworkError::ValueMustSatisfyComparison {
                value_name: "learning_rate".to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0.0,
            });
        }
        if self.batch_size == 0 {
            return Err(NetworkError::ValueMustSatisfyComparison {
                value_name: "batch_size".to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0.0,
            });
        }
        if num_observations % self.batch_size != 0 {
            return Err(NetworkError::RaggedBatch {
                num_observations,
                batch_size: self.batch_size,
            });
        }
        Ok(())
    }
}
