//! 取消令牌
//!
//! 长时间运行的增广 / 松弛循环在每一步检查令牌，令牌触发后返回 `Error::Cancelled`。

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消句柄，所有克隆共享同一状态
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// 令牌已触发时返回 `Error::Cancelled`
pub(crate) fn check(token: Option<&CancelToken>) -> Result<()> {
    match token {
        Some(t) if t.is_cancelled() => Err(Error::Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(check(Some(&token)).is_ok());

        other.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(check(Some(&token)), Err(Error::Cancelled)));
        assert!(check(None).is_ok());
    }
}
