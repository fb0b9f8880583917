//! 邮件投递服务
//!
//! 将渲染好的报告作为附件发送到调用方提供的地址。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::config::MailConfig;
use crate::error::{AppError, Result};

pub const REPORT_FILENAME: &str = "patient_report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";
pub const MAIL_SUBJECT: &str = "Relatório do paciente";
pub const MAIL_BODY: &str = "Segue em anexo o relatório do paciente.";

/// 邮件传输接口
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;
}

/// SMTP 传输（STARTTLS + 账号认证）
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let mut builder = builder.port(config.smtp_port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<()> {
        self.transport.send(message).await?;
        Ok(())
    }
}

/// 报告投递器
///
/// 发件人地址在启动时解析一次。
#[derive(Clone)]
pub struct DeliveryDispatcher {
    mailer: Arc<dyn Mailer>,
    from: Mailbox,
}

impl DeliveryDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, from: Mailbox) -> Self {
        Self { mailer, from }
    }

    /// 构造带 PDF 附件的报告邮件
    pub fn build_message(&self, to: &str, pdf: &[u8]) -> Result<Message> {
        let to: Mailbox = to.parse()?;
        let content_type = ContentType::parse(REPORT_CONTENT_TYPE)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(MAIL_SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(MAIL_BODY.to_string()))
                    .singlepart(
                        Attachment::new(REPORT_FILENAME.to_string())
                            .body(pdf.to_vec(), content_type),
                    ),
            )?;

        Ok(message)
    }

    /// 发送报告
    ///
    /// 任何传输失败都归为同一种投递错误。
    pub async fn send_report(&self, to: &str, pdf: &[u8]) -> Result<()> {
        let message = self.build_message(to, pdf)?;

        match self.mailer.send(message).await {
            Ok(()) => {
                info!("Report delivered to {}", to);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email: {}", e);
                Err(AppError::Delivery(match e {
                    AppError::Delivery(msg) => msg,
                    other => other.to_string(),
                }))
            }
        }
    }
}
