/// 错误断言宏 - 灵活粒度验证 Result 错误
///
/// # 用法
/// - `assert_err!(expr)` — 只验证是 Err
/// - `assert_err!(expr, Variant(literal))` — 验证错误类型 + 精确消息（String 变体）
/// - `assert_err!(expr, Pattern { .. })` — 验证错误类型
/// - `assert_err!(expr, Pattern { field, .. } if condition)` — 验证类型 + 条件
///
/// # 示例
/// ```ignore
/// assert_err!(result, NetworkError::NotImplemented("卷积层暂不支持参数初始化"));
/// assert_err!(result, NetworkError::RaggedBatch { batch_size: 3, .. });
/// assert_err!(result, NetworkError::InvalidTopology(msg) if msg.contains("池化层"));
/// ```
#[macro_export]
macro_rules! assert_err {
    // 只验证是 Err
    ($expr:expr) => {
        assert!($expr.is_err(), "预期 Err，实际得到 {:?}", $expr);
    };
    // 简洁语法：Variant(字符串字面量) - 精确匹配 String 内容
    ($expr:expr, $err_type:ident :: $variant:ident ( $expected:literal )) => {
        match &$expr {
            Err($err_type::$variant(actual)) => assert_eq!(
                actual, $expected,
                "错误消息不匹配：预期 `{}`，实际得到 `{}`",
                $expected, actual
            ),
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::{}`，实际得到 `{:?}`",
                stringify!($err_type), stringify!($variant), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::{})，实际得到 Ok({:?})",
                stringify!($err_type), stringify!($variant), v
            ),
        }
    };
    // 模式匹配 + 条件
    ($expr:expr, $pattern:pat if $cond:expr) => {
        match &$expr {
            Err($pattern) if $cond => {}
            Err(e) => panic!(
                "错误不满足条件：预期 `{}`，实际得到 `{:?}`",
                stringify!($pattern if $cond), e
            ),
            Ok(v) => panic!("预期 Err，实际得到 Ok({:?})", v),
        }
    };
    // 只匹配模式
    ($expr:expr, $pattern:pat) => {
        match &$expr {
            Err($pattern) => {}
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}`，实际得到 `{:?}`",
                stringify!($pattern), e
            ),
            Ok(v) => panic!("预期 Err，实际得到 Ok({:?})", v),
        }
    };
}

/// panic断言宏 - 验证表达式触发panic，并可精确比对panic消息
#[macro_export]
macro_rules! assert_panic {
    ($expr:expr) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr)) {
            Ok(_) => panic!("表达式没有触发panic"),
            Err(_) => (),
        }
    };
    ($expr:expr, $expected_msg:expr) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr)) {
            Ok(_) => panic!("表达式没有触发panic"),
            Err(err) => {
                let expected_msg_str = $expected_msg.to_string();
                if let Some(msg) = err.downcast_ref::<&'static str>() {
                    assert_eq!(*msg, expected_msg_str, "panic消息与预期不符");
                } else if let Some(msg) = err.downcast_ref::<String>() {
                    assert_eq!(*msg, expected_msg_str, "panic消息与预期不符");
                } else {
                    panic!(
                        "未找到预期的panic消息，预期的panic消息为: {}",
                        expected_msg_str
                    );
                }
            }
        }
    };
}
