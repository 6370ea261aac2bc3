//! # 常用接口模块
//!
//! 本模块提供单元测试常用的断言宏

pub mod macro_for_unit_test;
