/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 训练器：按轮（epoch）执行打乱后的小批量随机梯度下降
 *
 * 每轮：原地打乱全部样本 -> 切成固定大小的连续批次 -> 依次（不重叠地）对每个批次做一次反向传播+SGD。
 * 训练进度通过`TrainObserver`回调报告，默认的`LogObserver`只写日志。
 */

use crate::nn::config::TrainConfig;
use crate::nn::network::{Network, Observation};
use crate::nn::optimizer::SGD;
use crate::nn::NetworkError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// 一轮训练结束后的报告
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// 从1开始
    pub epoch: usize,
    pub num_epochs: usize,
    /// 本轮所有样本的平均代价（按更新前的参数计算）
    pub mean_loss: f64,
    pub duration: Duration,
}

/// 训练进度观察者
pub trait TrainObserver {
    fn on_epoch_end(&mut self, report: &EpochReport);

    fn on_batch_end(&mut self, _epoch: usize, _batch_index: usize, _batch_loss: f64) {}
}

impl<F: FnMut(&EpochReport)> TrainObserver for F {
    fn on_epoch_end(&mut self, report: &EpochReport) {
        self(report)
    }
}

/// 把训练进度写入`log`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl TrainObserver for LogObserver {
    fn on_epoch_end(&mut self, report: &EpochReport) {
        log::info!(
            "Epoch {}/{}: loss = {:.6} ({:.2?})",
            report.epoch,
            report.num_epochs,
            report.mean_loss,
            report.duration
        );
    }

    fn on_batch_end(&mut self, epoch: usize, batch_index: usize, batch_loss: f64) {
        log::debug!("Epoch {epoch} batch {batch_index}: loss = {batch_loss:.6}");
    }
}

pub struct Trainer<O: TrainObserver = LogObserver> {
    config: TrainConfig,
    observer: O,
}

impl Trainer<LogObserver> {
    pub fn new(config: TrainConfig) -> Self {
        Self {
            config,
            observer: LogObserver,
        }
    }
}

impl<O: TrainObserver> Trainer<O> {
    pub fn with_observer<P: TrainObserver>(self, observer: P) -> Trainer<P> {
        Trainer {
            config: self.config,
            observer,
        }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// 训练网络并返回每一轮的报告。前置条件不满足时在改动任何参数之前返回错误。
    pub fn train(
        &mut self,
        network: &mut Network,
        observations: &mut [Observation],
    ) -> Result<Vec<EpochReport>, NetworkError> {
        self.config.validate(observations.len())?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut optimizer = SGD::new(self.config.learning_rate);
        let num_epochs = self.config.num_epochs;
        let mut history = Vec::with_capacity(num_epochs);

        for epoch in 1..=num_epochs {
            let start = Instant::now();
            observations.shuffle(&mut rng);

            let mut total_cost = 0.0;
            for (batch_index, batch) in observations.chunks(self.config.batch_size).enumerate() {
                let gradients = if self.config.parallel {
                    network.compute_gradients_parallel(batch)
                } else {
                    network.compute_gradients(batch)
                };
                network.apply_gradients(&mut optimizer, &gradients);
                total_cost += gradients.total_cost;
                self.observer
                    .on_batch_end(epoch, batch_index, gradients.mean_cost());
            }

            let mean_loss = if observations.is_empty() {
                0.0
            } else {
                total_cost / observations.len() as f64
            };
            let report = EpochReport {
                epoch,
                num_epochs,
                mean_loss,
                duration: start.elapsed(),
            };
            self.observer.on_epoch_end(&report);
            history.push(report);
        }

        Ok(history)
    }
}

/// 按随机梯度下降（SGD）训练网络，进度写入日志
pub fn train(
    network: &mut Network,
    observations: &mut [Observation],
    num_epochs: usize,
    batch_size: usize,
    learning_rate: f64,
) -> Result<(), NetworkError> {
    let config = TrainConfig::new()
        .num_epochs(num_epochs)
        .batch_size(batch_size)
        .learning_rate(learning_rate);
    Trainer::new(config).train(network, observations)?;
    Ok(())
}
