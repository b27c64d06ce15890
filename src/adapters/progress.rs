use crate::domain::ports::ProgressSink;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Writes each status line to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, status: &str) {
        tracing::info!("⏳ {}", status);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _status: &str) {}
}

/// 將狀態字串送往 channel，給 UI 端消費
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: UnboundedSender<String>,
}

impl ChannelProgress {
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, status: &str) {
        // 接收端關閉時直接丟棄
        let _ = self.tx.send(status.to_string());
    }
}
