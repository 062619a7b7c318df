mod attribution;

pub use attribution::AttributionHandler;

/// 处理器返回值；错误只记录日志，不影响请求结果
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
