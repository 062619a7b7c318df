//! API 常量定义

/// 所有 tracking 路由的公共前缀
pub const TRACKING_API_PREFIX: &str = "/api/v1/tracking";

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 成功写入后返回的状态
pub const STATUS_RECORDED: &str = "recorded";

/// 请求体大小上限（字节）
pub const MAX_JSON_PAYLOAD: usize = 64 * 1024;
