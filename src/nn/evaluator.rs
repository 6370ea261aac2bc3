/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 评估：统计分类正确的样本数。标签须为1-of-k编码，类别从0开始
 */

use crate::nn::network::{Network, Observation};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// 正确率（百分比）；空测试集为0
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correctly classified observations ({}%)",
            self.correct,
            self.percentage()
        )
    }
}

/// 测试网络：输出层激活值的最大值下标与标签的最大值下标一致即为分类正确。不修改网络参数。
pub fn test(network: &Network, observations: &[Observation]) -> Evaluation {
    let correct = observations
        .iter()
        .filter(|(x, y)| {
            let output = network.predict(x);
            output.argmax() == y.argmax()
        })
        .count();

    let evaluation = Evaluation {
        correct,
        total: observations.len(),
    };
    log::info!("{evaluation}");
    evaluation
}
