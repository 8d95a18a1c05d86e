//! 后台通知服务
//! 用 sleep 模拟慢速的外部发送，真实写入的只有一个本地日志文件

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tracing::{error, info};

#[derive(Clone)]
pub struct NotificationService {
    log_path: PathBuf,
    send_delay: Duration,
}

impl NotificationService {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            send_delay: Duration::from_secs(2),
        }
    }

    /// 测试时用更短的延迟
    pub fn with_delay(log_path: PathBuf, send_delay: Duration) -> Self {
        Self {
            log_path,
            send_delay,
        }
    }

    /// 模拟发送通知：先等待，再把一行记录追加到日志文件
    pub async fn write_notification(&self, email: &str, message: &str) -> std::io::Result<()> {
        tokio::time::sleep(self.send_delay).await;

        let line = format!(
            "{} - 发送给 {}: {}\n",
            chrono::Utc::now().to_rfc3339(),
            email,
            message
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        file.write_all(line.as_bytes()).await?;

        info!("通知已写入日志: {}", email);
        Ok(())
    }

    /// 立即返回，通知在后台任务中完成
    /// 响应已经发出，失败只能记录日志，无法再通知客户端
    pub fn send_in_background(&self, email: String, message: String) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.write_notification(&email, &message).await {
                error!("后台通知写入失败 ({}): {}", email, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_write_notification_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.txt");
        let service =
            NotificationService::with_delay(log_path.clone(), Duration::from_millis(1));

        service
            .write_notification("alice@example.com", "订单已发货")
            .await
            .unwrap();
        service
            .write_notification("bob@example.com", "订单已发货")
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&log_path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("alice@example.com"));
        assert!(lines[1].contains("bob@example.com"));
    }

    #[tokio::test]
    async fn test_send_in_background_returns_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.txt");
        let service =
            NotificationService::with_delay(log_path.clone(), Duration::from_millis(10));

        service.send_in_background("alice@example.com".to_string(), "你好".to_string());

        // 调用立即返回，此时文件还不存在
        assert!(!log_path.exists());

        // 等后台任务完成
        tokio::time::sleep(Duration::from_millis(200)).await;
        let content = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert!(content.contains("alice@example.com"));
    }
}
