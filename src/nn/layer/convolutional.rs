/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 卷积层（valid 模式互相关，步长固定为1）
 *
 * 形状约定：
 * - 输入：上一层的激活值，视作 prev_depth 张二维特征图 [prev_depth, H, W]
 * - 权重：[depth, prev_depth, k, k]；偏置：[depth, 1]
 * - 输出 z/a：[depth, 1, height, width]，height = H - k + 1，width = W - k + 1
 *   （每个输出通道一张特征图，中间的1维是与池化层约定的格式）
 *
 * 反向传播中误差传回上一层时，按 kernel_size 为步长分块散布（而非完整的转置卷积），
 * 这要求本层的空间尺寸能被 kernel_size 整除，构造时即校验。
 */

use super::{delta_for_prev_layer, ForwardRecord, Layer, LayerGradients, TraitLayer};
use crate::errors::ComparisonOperator;
use crate::nn::functions::Activation;
use crate::nn::NetworkError;
use crate::tensor::Tensor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionalLayer {
    depth: usize,
    height: usize,
    width: usize,
    kernel_size: usize,
    stride_length: usize,
    activation: Activation,
}

impl ConvolutionalLayer {
    /// 创建卷积层，`depth`/`height`/`width`为输出特征图的形状
    pub fn new(
        depth: usize,
        height: usize,
        width: usize,
        kernel_size: usize,
        activation: Activation,
    ) -> Result<Self, NetworkError> {
        for (value_name, value) in [
            ("depth", depth),
            ("height", height),
            ("width", width),
            ("kernel_size", kernel_size),
        ] {
            if value == 0 {
                return Err(NetworkError::ValueMustSatisfyComparison {
                    value_name: value_name.to_string(),
                    operator: ComparisonOperator::GreaterThan,
                    threshold: 0.0,
                });
            }
        }
        if height % kernel_size != 0 || width % kernel_size != 0 {
            return Err(NetworkError::InvalidTopology(format!(
                "卷积层的输出尺寸{height}x{width}须能被kernel_size={kernel_size}整除"
            )));
        }

        Ok(Self {
            depth,
            height,
            width,
            kernel_size,
            stride_length: 1,
            activation,
        })
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    pub fn stride_length(&self) -> usize {
        self.stride_length
    }

    pub fn activation_function(&self) -> Activation {
        self.activation
    }

    /// 上一层激活值须能被视作`[prev_depth, height + k - 1, width + k - 1]`
    fn input_shape(&self, prev_layer: &Layer) -> [usize; 3] {
        [
            prev_layer.depth(),
            self.height + self.kernel_size - 1,
            self.width + self.kernel_size - 1,
        ]
    }

    fn stacked_input(&self, prev_layer: &Layer, prev_record: &ForwardRecord) -> Tensor {
        let input_shape = self.input_shape(prev_layer);
        assert!(
            prev_layer.height() == input_shape[1] && prev_layer.width() == input_shape[2],
            "卷积层期望{}x{}的输入特征图，上一层输出为{}x{}",
            input_shape[1],
            input_shape[2],
            prev_layer.height(),
            prev_layer.width()
        );
        let input = if prev_record.a.dimension() == 3 {
            prev_record.a.clone()
        } else {
            prev_record.a.reshape(&input_shape)
        };
        input.assert_shape(&input_shape, "卷积层的输入");
        input
    }

    fn assert_params(&self, prev_depth: usize, weights: &Tensor) {
        weights.assert_shape(
            &[self.depth, prev_depth, self.kernel_size, self.kernel_size],
            "卷积层的权重",
        );
    }
}

impl TraitLayer for ConvolutionalLayer {
    fn depth(&self) -> usize {
        self.depth
    }

    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn activation(&self) -> Option<Activation> {
        Some(self.activation)
    }

    fn param_shapes(&self, prev_layer: &Layer) -> Option<(Vec<usize>, Vec<usize>)> {
        Some((
            vec![
                self.depth,
                prev_layer.depth(),
                self.kernel_size,
                self.kernel_size,
            ],
            vec![self.depth, 1],
        ))
    }

    fn feedforward(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        biases: &Tensor,
    ) -> ForwardRecord {
        let input = self.stacked_input(prev_layer, prev_record);
        let prev_depth = input.shape()[0];
        self.assert_params(prev_depth, weights);
        biases.assert_shape(&[self.depth, 1], "卷积层的偏置");

        let k = self.kernel_size;
        let mut z = Tensor::zeros(&[self.depth, 1, self.height, self.width]);
        for r in 0..self.depth {
            for i in 0..self.height {
                for j in 0..self.width {
                    let mut value = biases[[r, 0]];
                    for t in 0..prev_depth {
                        for h in 0..k {
                            for v in 0..k {
                                value += weights[[r, t, h, v]] * input[[t, i + h, j + v]];
                            }
                        }
                    }
                    z[[r, 0, i, j]] = value;
                }
            }
        }

        let a = self.activation.apply(&z);
        ForwardRecord::new(z, a)
    }

    fn backpropagate(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        delta_z: &Tensor,
    ) -> LayerGradients {
        let input = self.stacked_input(prev_layer, prev_record);
        let [prev_depth, prev_height, prev_width] = self.input_shape(prev_layer);
        self.assert_params(prev_depth, weights);
        delta_z.assert_shape(&[self.depth, 1, self.height, self.width], "卷积层的误差");

        let k = self.kernel_size;
        let s = self.stride_length;

        // 1. 权重导数：输入特征图与误差特征图的互相关
        let mut der_weights = Tensor::zeros(weights.shape());
        for r in 0..self.depth {
            for t in 0..prev_depth {
                for h in 0..k {
                    for v in 0..k {
                        let mut value = 0.0;
                        for i in (0..self.height).step_by(s) {
                            for j in (0..self.width).step_by(s) {
                                value += input[[t, i + h, j + v]] * delta_z[[r, 0, i, j]];
                            }
                        }
                        der_weights[[r, t, h, v]] = value;
                    }
                }
            }
        }

        // 2. 偏置导数：每个输出通道的误差之和
        let mut der_biases = Tensor::zeros(&[self.depth, 1]);
        for r in 0..self.depth {
            let mut value = 0.0;
            for i in 0..self.height {
                for j in 0..self.width {
                    value += delta_z[[r, 0, i, j]];
                }
            }
            der_biases[[r, 0]] = value;
        }

        // 3. 误差反传：以 kernel_size 为步长遍历上一层的特征图，
        //    每个 k×k 块累加 核切片 × 对应位置的误差（越界的块按边界裁剪）
        let mut delta_a_prev = Tensor::zeros(&[prev_depth, prev_height, prev_width]);
        for t in 0..prev_depth {
            for r in 0..self.depth {
                for m in (0..prev_height).step_by(k) {
                    for n in (0..prev_width).step_by(k) {
                        let error = delta_z[[r, 0, m / k, n / k]];
                        let rows = k.min(prev_height - m);
                        let cols = k.min(prev_width - n);
                        for p in 0..rows {
                            for q in 0..cols {
                                delta_a_prev[[t, m + p, n + q]] += weights[[r, t, p, q]] * error;
                            }
                        }
                    }
                }
            }
        }
        let delta_a_prev = delta_a_prev.reshape(prev_record.a.shape());
        let delta_z_prev = delta_for_prev_layer(prev_layer, prev_record, delta_a_prev);

        LayerGradients {
            der_weights,
            der_biases,
            delta_z_prev,
        }
    }
}
