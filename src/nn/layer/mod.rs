/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : Layer 模块 - 网络中的一级（输入/全连接/卷积/池化）
 *
 * 设计决策：
 * - 层本身只保存形状与函数，不保存 z/a：`feedforward` 把二者作为`ForwardRecord`返回，
 *   由 Network 按样本依次传递，因此同一组层可被多个样本并发使用
 * - 四种层构成封闭的和类型`Layer`，通过 enum_dispatch 分派`TraitLayer`
 * - 形状契约被违反时直接 panic（网络搭建有误，而非数据问题）
 */

mod convolutional;
mod fully_connected;
mod input;
mod pooling;

pub use convolutional::ConvolutionalLayer;
pub use fully_connected::FullyConnectedLayer;
pub use input::InputLayer;
pub use pooling::PoolingLayer;

use crate::errors::TensorError;
use crate::nn::functions::Activation;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;
use std::fmt;

/// 一次前向传播中某一层的输出记录
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRecord {
    /// 预激活值；输入层没有预激活值
    pub z: Option<Tensor>,
    /// 激活值
    pub a: Tensor,
}

impl ForwardRecord {
    pub fn new(z: Tensor, a: Tensor) -> Self {
        assert!(
            z.is_same_shape(&a),
            "{}",
            TensorError::ShapeMismatch {
                what: "激活值".to_string(),
                expected: z.shape().to_vec(),
                got: a.shape().to_vec(),
            }
        );
        Self { z: Some(z), a }
    }

    /// 输入层的记录：观测值直接作为激活值
    pub fn input(x: Tensor) -> Self {
        Self { z: None, a: x }
    }
}

/// 某一层反向传播的结果
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    /// 代价关于本层（输入）权重的导数，形状与权重一致；无参数的层为空张量
    pub der_weights: Tensor,
    /// 代价关于本层偏置的导数，形状与偏置一致；无参数的层为空张量
    pub der_biases: Tensor,
    /// 传给上一层的误差 ∂C/∂z_prev（上一层无预激活值时为 ∂C/∂a_prev）
    pub delta_z_prev: Tensor,
}

#[enum_dispatch]
pub trait TraitLayer {
    fn depth(&self) -> usize;

    fn height(&self) -> usize;

    fn width(&self) -> usize;

    fn num_neurons_out(&self) -> usize {
        self.depth() * self.height() * self.width()
    }

    /// 本层的激活函数（输入层、池化层没有）
    fn activation(&self) -> Option<Activation> {
        None
    }

    /// 本层激活函数在`z`处的导数；没有激活函数的层视为恒等（a == z）
    fn activation_derivative(&self, z: &Tensor) -> Tensor {
        match self.activation() {
            Some(activation) => activation.derivative(z),
            None => Tensor::ones(z.shape()),
        }
    }

    /// Network 能否为本层初始化权重与偏置。目前只有全连接层支持
    fn supports_param_init(&self) -> bool {
        false
    }

    /// 本层（输入）参数的形状`(权重, 偏置)`；无参数的层返回`None`
    fn param_shapes(&self, _prev_layer: &Layer) -> Option<(Vec<usize>, Vec<usize>)> {
        None
    }

    /// 前向传播：由上一层的输出计算本层的 z 与 a
    fn feedforward(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        biases: &Tensor,
    ) -> ForwardRecord;

    /// 反向传播：`delta_z`为代价关于本层预激活值的导数，
    /// `prev_record`须来自同一次前向传播
    fn backpropagate(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        delta_z: &Tensor,
    ) -> LayerGradients;
}

#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Input(InputLayer),
    FullyConnected(FullyConnectedLayer),
    Convolutional(ConvolutionalLayer),
    Pooling(PoolingLayer),
}

impl Layer {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Layer::Input(_) => "InputLayer",
            Layer::FullyConnected(_) => "FullyConnectedLayer",
            Layer::Convolutional(_) => "ConvolutionalLayer",
            Layer::Pooling(_) => "PoolingLayer",
        }
    }
}

/// 输出形如`FullyConnectedLayer(activation: sigmoid, depth: 1, ...)`，字段按名称排序
impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<(&str, String)> = vec![
            ("depth", self.depth().to_string()),
            ("height", self.height().to_string()),
            ("num_neurons_out", self.num_neurons_out().to_string()),
            ("width", self.width().to_string()),
        ];
        match self {
            Layer::Input(_) => {}
            Layer::FullyConnected(layer) => {
                fields.push(("activation", layer.activation_function().to_string()));
            }
            Layer::Convolutional(layer) => {
                fields.push(("activation", layer.activation_function().to_string()));
                fields.push(("kernel_size", layer.kernel_size().to_string()));
                fields.push(("stride_length", layer.stride_length().to_string()));
            }
            Layer::Pooling(layer) => {
                fields.push(("pooling", layer.pooling().to_string()));
                fields.push(("stride_length", layer.stride_length().to_string()));
                fields.push(("window_size", layer.window_size().to_string()));
            }
        }
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let body = fields
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.kind_name(), body)
    }
}

/// 把传到上一层激活值上的误差 ∂C/∂a_prev 转换为 ∂C/∂z_prev：
/// 逐元素乘以上一层激活函数在 z_prev 处的导数。上一层没有预激活值（输入层）时原样返回。
pub(crate) fn delta_for_prev_layer(
    prev_layer: &Layer,
    prev_record: &ForwardRecord,
    delta_a_prev: Tensor,
) -> Tensor {
    match &prev_record.z {
        Some(prev_z) => {
            prev_z.assert_shape(prev_record.a.shape(), "上一层的预激活值");
            delta_a_prev * prev_layer.activation_derivative(prev_z)
        }
        None => delta_a_prev,
    }
}
