/*
 * @Author       : 老董
 * @Date         : 2023-10-21 03:22:26
 * @Description  : 本类仅包含一些属性方法和索引，不包含任何运算方法
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:20:05
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::{ArrayViewD, ArrayViewMutD};
use std::ops::{Index, IndexMut};

impl Tensor {
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓快照/view(_mut)↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.data.view()
    }
    pub fn view_mut(&mut self) -> ArrayViewMutD<'_, f64> {
        self.data.view_mut()
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑快照/view(_mut)↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]。
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// 张量的维（dim）数、阶（rank）数
    /// 即`shape()`的元素个数--如：形状为`[]`的标量阶数为0，向量阶数为1，矩阵阶数为2，以此类推
    pub fn dimension(&self) -> usize {
        self.data.ndim()
    }

    /// 计算张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 是否不含任何元素
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 判断两个张量的形状是否严格一致。如：形状为 [1, 4]，[1, 4]和[4]是不一致的，会返回false
    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 按行优先（C序）顺序拷贝出全部元素
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// 断言张量的阶数，违反时直接panic
    pub(crate) fn assert_dimension(&self, expected: usize) {
        assert!(
            self.dimension() == expected,
            "{}",
            TensorError::DimensionMismatch {
                expected,
                got: self.dimension(),
            }
        );
    }

    /// 断言张量的形状，违反时直接panic
    pub(crate) fn assert_shape(&self, expected: &[usize], what: &str) {
        assert!(
            self.shape() == expected,
            "{}",
            TensorError::ShapeMismatch {
                what: what.to_string(),
                expected: expected.to_vec(),
                got: self.shape().to_vec(),
            }
        );
    }
}

// 按坐标索引单个元素，如`tensor[[r, t, h, v]]`
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f64;

    fn index(&self, index: [usize; N]) -> &f64 {
        &self.data[&index[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut f64 {
        &mut self.data[&index[..]]
    }
}
