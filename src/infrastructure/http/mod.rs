mod http_webhook_notifier;
mod reqwest_image_fetcher;

pub use http_webhook_notifier::{HttpWebhookNotifier, WebhookPayload};
pub use reqwest_image_fetcher::ReqwestImageFetcher;
