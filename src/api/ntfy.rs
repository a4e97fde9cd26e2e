//! [ntfy](https://docs.ntfy.sh/publish/) publisher.

use reqwest::{Client as HttpClient, Url};

use crate::{api::client, prelude::*};

pub struct Client {
    inner: HttpClient,
    url: Url,
}

impl Client {
    /// The URL is the full topic URL, for example: `https://ntfy.sh/electricity`.
    pub fn new(url: Url) -> Result<Self> {
        Ok(Self { inner: client::try_new()?, url })
    }

    #[instrument(skip_all, fields(url = %self.url, title = message.title))]
    pub async fn publish(&self, message: &Message<'_>) -> Result {
        self.inner
            .post(self.url.clone())
            .header("Title", message.title)
            .header("Priority", message.priority.as_str())
            .header("Tags", message.tags.join(","))
            .body(message.body.to_owned())
            .send()
            .await
            .with_context(|| format!("failed to publish to `{}`", self.url))?
            .error_for_status()
            .context("ntfy rejected the message")?;
        debug!("published");
        Ok(())
    }
}

pub struct Message<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub priority: Priority,
    pub tags: &'a [&'a str],
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
    Max,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Low => "low",
            Self::Default => "default",
            Self::High => "high",
            Self::Max => "max",
        }
    }
}
