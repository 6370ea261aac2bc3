/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 神经网络：持有输入层、各层及其（输入）权重与偏置，负责整条链路的前向与反向传播
 *
 * 每个样本的 z/a 都保存在各自的`ForwardRecord`中，`feedforward`与梯度计算只需`&self`，
 * 故一个批次内的样本可以并行计算（梯度求和仍是串行的归约）。
 */

use crate::nn::functions::Cost;
use crate::nn::layer::{ForwardRecord, InputLayer, Layer, TraitLayer};
use crate::nn::optimizer::{Optimizer, SGD};
use crate::nn::NetworkError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// 一个观测样本：(输入, 1-of-k编码的标签)
pub type Observation = (Tensor, Tensor);

/// 一个批次内累加（而非平均）的梯度，按层下标与网络参数一一对应
#[derive(Debug, Clone, PartialEq)]
pub struct BatchGradients {
    pub der_weights: Vec<Tensor>,
    pub der_biases: Vec<Tensor>,
    /// 批次内各样本的代价之和
    pub total_cost: f64,
    /// 已累加的样本数
    pub batch_len: usize,
}

impl BatchGradients {
    /// 与给定参数同形的全零梯度
    pub fn zeros_like(weights: &[Tensor], biases: &[Tensor]) -> Self {
        Self {
            der_weights: weights.iter().map(|w| Tensor::zeros(w.shape())).collect(),
            der_biases: biases.iter().map(|b| Tensor::zeros(b.shape())).collect(),
            total_cost: 0.0,
            batch_len: 0,
        }
    }

    /// 两份梯度相加（用于并行归约）
    pub fn merge(mut self, other: BatchGradients) -> Self {
        for (acc, g) in self.der_weights.iter_mut().zip(&other.der_weights) {
            *acc += g;
        }
        for (acc, g) in self.der_biases.iter_mut().zip(&other.der_biases) {
            *acc += g;
        }
        self.total_cost += other.total_cost;
        self.batch_len += other.batch_len;
        self
    }

    /// 批次的平均代价；空批次为0
    pub fn mean_cost(&self) -> f64 {
        if self.batch_len == 0 {
            0.0
        } else {
            self.total_cost / self.batch_len as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct Network {
    input_layer: Layer,
    layers: Vec<Layer>,
    weights: Vec<Tensor>,
    biases: Vec<Tensor>,
    cost: Cost,
}

impl Network {
    /// 创建网络，参数用系统熵作随机种子初始化
    pub fn new(input_layer: InputLayer, layers: Vec<Layer>, cost: Cost) -> Result<Self, NetworkError> {
        Self::new_with_rng(input_layer, layers, cost, &mut StdRng::from_entropy())
    }

    /// 创建一个带固定种子的网络（确保可重复性）
    pub fn new_with_seed(
        input_layer: InputLayer,
        layers: Vec<Layer>,
        cost: Cost,
        seed: u64,
    ) -> Result<Self, NetworkError> {
        Self::new_with_rng(input_layer, layers, cost, &mut StdRng::seed_from_u64(seed))
    }

    /// 创建网络：每个全连接层的权重与偏置都取自 N(0, 1/√fan_in)，fan_in 为上一层的神经元数。
    /// 目前只有全连接层支持参数初始化，其余层返回`NetworkError::NotImplemented`。
    pub fn new_with_rng<R: Rng + ?Sized>(
        input_layer: InputLayer,
        layers: Vec<Layer>,
        cost: Cost,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        let input_layer = Layer::from(input_layer);
        validate_chain(&input_layer, &layers)?;

        let mut weights = Vec::with_capacity(layers.len());
        let mut biases = Vec::with_capacity(layers.len());
        let mut prev_layer = &input_layer;
        for layer in &layers {
            if !layer.supports_param_init() {
                return Err(NetworkError::NotImplemented(format!(
                    "{}暂不支持参数初始化",
                    layer.kind_name()
                )));
            }
            let Some((weight_shape, bias_shape)) = layer.param_shapes(prev_layer) else {
                return Err(NetworkError::NotImplemented(format!(
                    "{}没有可初始化的参数",
                    layer.kind_name()
                )));
            };
            let std_dev = 1.0 / (prev_layer.num_neurons_out() as f64).sqrt();
            weights.push(Tensor::new_normal_with_rng(0.0, std_dev, &weight_shape, rng));
            biases.push(Tensor::new_normal_with_rng(0.0, std_dev, &bias_shape, rng));
            prev_layer = layer;
        }

        Ok(Self {
            input_layer,
            layers,
            weights,
            biases,
            cost,
        })
    }

    pub fn input_layer(&self) -> &Layer {
        &self.input_layer
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn output_layer(&self) -> &Layer {
        // 构造时已保证至少有一层
        &self.layers[self.layers.len() - 1]
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn weights(&self, layer_index: usize) -> &Tensor {
        &self.weights[layer_index]
    }

    pub fn biases(&self, layer_index: usize) -> &Tensor {
        &self.biases[layer_index]
    }

    /// 替换第`layer_index`层的参数，形状须与原参数一致
    pub fn set_parameters(
        &mut self,
        layer_index: usize,
        weights: Tensor,
        biases: Tensor,
    ) -> Result<(), NetworkError> {
        if layer_index >= self.layers.len() {
            return Err(NetworkError::InvalidTopology(format!(
                "层下标{layer_index}越界，网络共{}层",
                self.layers.len()
            )));
        }
        for (new, old, what) in [
            (&weights, &self.weights[layer_index], "权重"),
            (&biases, &self.biases[layer_index], "偏置"),
        ] {
            if !new.is_same_shape(old) {
                return Err(NetworkError::ShapeMismatch {
                    expected: old.shape().to_vec(),
                    got: new.shape().to_vec(),
                    message: format!("第{layer_index}层的{what}形状不符"),
                });
            }
        }
        self.weights[layer_index] = weights;
        self.biases[layer_index] = biases;
        Ok(())
    }

    fn prev_layer(&self, layer_index: usize) -> &Layer {
        if layer_index == 0 {
            &self.input_layer
        } else {
            &self.layers[layer_index - 1]
        }
    }

    /// 前向传播一个观测值，返回每一层的记录（下标0为输入层，其激活值即`x`）
    pub fn feedforward(&self, x: &Tensor) -> Vec<ForwardRecord> {
        assert!(
            x.size() == self.input_layer.num_neurons_out(),
            "观测值的元素数{}与输入层的神经元数{}不符",
            x.size(),
            self.input_layer.num_neurons_out()
        );

        let mut records = Vec::with_capacity(self.layers.len() + 1);
        records.push(ForwardRecord::input(x.clone()));
        for (i, layer) in self.layers.iter().enumerate() {
            let record = layer.feedforward(
                self.prev_layer(i),
                &records[i],
                &self.weights[i],
                &self.biases[i],
            );
            records.push(record);
        }
        records
    }

    /// 输出层的激活值
    pub fn predict(&self, x: &Tensor) -> Tensor {
        let mut records = self.feedforward(x);
        match records.pop() {
            Some(record) => record.a,
            None => unreachable!("前向记录至少包含输入层"),
        }
    }

    /// 单个观测的代价
    pub fn cost_of(&self, x: &Tensor, y: &Tensor) -> f64 {
        self.cost.value(&self.predict(x), y)
    }

    /// 单个观测的梯度（batch_len = 1）
    pub fn observation_gradients(&self, x: &Tensor, y: &Tensor) -> BatchGradients {
        let records = self.feedforward(x);
        let output = &records[records.len() - 1];
        let Some(output_z) = &output.z else {
            panic!("输出层没有预激活值");
        };

        // 输出层误差：∂C/∂a ⊙ act'(z)
        let mut delta_z = self.cost.derivative(&output.a, y)
            * self.output_layer().activation_derivative(output_z);

        let mut der_weights = vec![Tensor::empty(); self.layers.len()];
        let mut der_biases = vec![Tensor::empty(); self.layers.len()];
        for i in (0..self.layers.len()).rev() {
            let gradients = self.layers[i].backpropagate(
                self.prev_layer(i),
                &records[i],
                &self.weights[i],
                &delta_z,
            );
            der_weights[i] = gradients.der_weights;
            der_biases[i] = gradients.der_biases;
            delta_z = gradients.delta_z_prev;
        }

        BatchGradients {
            der_weights,
            der_biases,
            total_cost: self.cost.value(&output.a, y),
            batch_len: 1,
        }
    }

    /// 逐个样本计算并累加整个批次的梯度
    pub fn compute_gradients(&self, batch: &[Observation]) -> BatchGradients {
        batch.iter().fold(self.zero_gradients(), |acc, (x, y)| {
            acc.merge(self.observation_gradients(x, y))
        })
    }

    /// 同`compute_gradients`，但批次内的样本用 Rayon 并行计算
    pub fn compute_gradients_parallel(&self, batch: &[Observation]) -> BatchGradients {
        batch
            .par_iter()
            .map(|(x, y)| self.observation_gradients(x, y))
            .reduce(|| self.zero_gradients(), BatchGradients::merge)
    }

    fn zero_gradients(&self) -> BatchGradients {
        BatchGradients::zeros_like(&self.weights, &self.biases)
    }

    /// 用优化器把批次梯度应用到参数上
    pub fn apply_gradients<O: Optimizer + ?Sized>(
        &mut self,
        optimizer: &mut O,
        gradients: &BatchGradients,
    ) {
        optimizer.step(&mut self.weights, &mut self.biases, gradients);
    }

    /// 对一个批次做反向传播并以学习率`eta`执行一步 SGD，返回批次平均代价
    pub fn backpropagate(&mut self, batch: &[Observation], eta: f64) -> f64 {
        let gradients = self.compute_gradients(batch);
        self.apply_gradients(&mut SGD::new(eta), &gradients);
        gradients.mean_cost()
    }
}

/// 校验层的衔接关系：
/// - 至少一层，且输入层只能作为第一层
/// - 池化层必须紧跟在深度相同的卷积层之后，且卷积层输出恰好被窗口划分
/// - 卷积层的输入尺寸须为 height + k - 1
pub fn validate_chain(input_layer: &Layer, layers: &[Layer]) -> Result<(), NetworkError> {
    if !matches!(input_layer, Layer::Input(_)) {
        return Err(NetworkError::InvalidTopology(format!(
            "网络的第一层须为输入层，实际为{}",
            input_layer.kind_name()
        )));
    }
    if layers.is_empty() {
        return Err(NetworkError::InvalidTopology(
            "网络至少需要一个非输入层".to_string(),
        ));
    }

    let mut prev_layer = input_layer;
    for (i, layer) in layers.iter().enumerate() {
        match layer {
            Layer::Input(_) => {
                return Err(NetworkError::InvalidTopology(format!(
                    "第{i}层为输入层，输入层只能作为网络的第一层"
                )));
            }
            Layer::FullyConnected(_) => {}
            Layer::Convolutional(conv) => {
                let expected_h = conv.height() + conv.kernel_size() - 1;
                let expected_w = conv.width() + conv.kernel_size() - 1;
                if prev_layer.height() != expected_h || prev_layer.width() != expected_w {
                    return Err(NetworkError::InvalidTopology(format!(
                        "第{i}层（卷积层）期望{expected_h}x{expected_w}的输入，上一层输出为{}x{}",
                        prev_layer.height(),
                        prev_layer.width()
                    )));
                }
            }
            Layer::Pooling(pool) => {
                let Layer::Convolutional(conv) = prev_layer else {
                    return Err(NetworkError::InvalidTopology(format!(
                        "第{i}层（池化层）的上一层必须是卷积层，实际为{}",
                        prev_layer.kind_name()
                    )));
                };
                if conv.depth() != pool.depth() {
                    return Err(NetworkError::InvalidTopology(format!(
                        "第{i}层（池化层）的深度{}须与上一卷积层的深度{}一致",
                        pool.depth(),
                        conv.depth()
                    )));
                }
                let ws = pool.window_size();
                if conv.height() != pool.height() * ws || conv.width() != pool.width() * ws {
                    return Err(NetworkError::InvalidTopology(format!(
                        "第{i}层（池化层）：卷积层输出{}x{}不能被window_size={ws}划分为{}x{}个窗口",
                        conv.height(),
                        conv.width(),
                        pool.height(),
                        pool.width()
                    )));
                }
            }
        }
        prev_layer = layer;
    }
    Ok(())
}
